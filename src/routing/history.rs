//! Navigation layer contract and an in-memory history.

use std::collections::VecDeque;

use tracing::debug;

use crate::routing::RoutePath;

/// How a location change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// New history entry (links, explicit locale switches).
    Push,
    /// Current entry overwritten (corrections); no back-button entry.
    Replace,
    /// Back/forward traversal.
    Pop,
}

/// The host navigation mechanism.
///
/// Reports the current location, accepts replace- and push-style
/// navigations, and hands out the navigation events those produce.
pub trait Navigator {
    fn location(&self) -> RoutePath;

    fn replace(&mut self, path: RoutePath);

    fn push(&mut self, path: RoutePath);

    /// Next pending navigation event, oldest first.
    fn next_event(&mut self) -> Option<NavigationKind>;
}

/// A browser-like history stack kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<RoutePath>,
    index: usize,
    pending: VecDeque<NavigationKind>,
    log: Vec<(NavigationKind, RoutePath)>,
    honors_navigation: bool,
}

impl MemoryHistory {
    /// A history holding a single entry.
    pub fn new(initial: impl Into<RoutePath>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
            pending: VecDeque::new(),
            log: Vec::new(),
            honors_navigation: true,
        }
    }

    /// A history that silently ignores every replace and push request.
    pub fn unresponsive(initial: impl Into<RoutePath>) -> Self {
        Self {
            honors_navigation: false,
            ..Self::new(initial)
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[RoutePath] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every honored push and replace, in order.
    pub fn navigations(&self) -> &[(NavigationKind, RoutePath)] {
        &self.log
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.pending.push_back(NavigationKind::Pop);
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.pending.push_back(NavigationKind::Pop);
        true
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> RoutePath {
        self.entries[self.index].clone()
    }

    fn replace(&mut self, path: RoutePath) {
        if !self.honors_navigation {
            debug!("Ignoring replace to {}", path);
            return;
        }
        self.entries[self.index] = path.clone();
        self.log.push((NavigationKind::Replace, path));
        self.pending.push_back(NavigationKind::Replace);
    }

    fn push(&mut self, path: RoutePath) {
        if !self.honors_navigation {
            debug!("Ignoring push to {}", path);
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(path.clone());
        self.index += 1;
        self.log.push((NavigationKind::Push, path));
        self.pending.push_back(NavigationKind::Push);
    }

    fn next_event(&mut self) -> Option<NavigationKind> {
        self.pending.pop_front()
    }
}
