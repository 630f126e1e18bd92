use super::{Annotation, AnnotationSet};

/// Info overlay state: which annotation is shown and whether the overlay
/// is open. The host mirrors this onto the overlay markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    open: bool,
    active: Option<String>,
    title: String,
    content: String,
}

impl InfoPanel {
    /// Whether the overlay is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Id of the last annotation opened. Survives [`close`](Self::close).
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Current heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current HTML body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Show `annotation` and open the overlay.
    pub fn open(&mut self, annotation: &Annotation) {
        self.active = Some(annotation.id.clone());
        annotation.display_title().clone_into(&mut self.title);
        annotation.html.clone_into(&mut self.content);
        self.open = true;
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Toggle button: close if open, otherwise reopen the active annotation
    /// or the first one in `set`.
    pub fn toggle(&mut self, set: &AnnotationSet) {
        if self.open {
            self.close();
            return;
        }
        let next = self
            .active
            .as_deref()
            .and_then(|id| set.get(id))
            .or_else(|| set.first());
        if let Some(annotation) = next {
            self.open(annotation);
        }
    }

    /// Keyboard handler. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.close();
            return true;
        }
        false
    }

    /// Value for the overlay's `aria-hidden` attribute.
    #[must_use]
    pub fn aria_hidden(&self) -> &'static str {
        if self.open {
            "false"
        } else {
            "true"
        }
    }

    /// Value for the toggle button's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}
