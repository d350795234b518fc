use crate::page::{Handle, NavBar};

/// Single-selection highlighting for the navigation links.
pub struct NavHighlighter {
    nav: Handle<NavBar>,
}

impl NavHighlighter {
    pub fn new(nav: Handle<NavBar>) -> Self {
        Self { nav }
    }

    /// Mark the clicked link active and every other link inactive.
    pub fn click(&self, index: usize) -> bool {
        let activated = self.nav.borrow_mut().activate(index);
        if !activated {
            tracing::warn!(index, "click on unknown navigation link");
        }
        activated
    }
}
