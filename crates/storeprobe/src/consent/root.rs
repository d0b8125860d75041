//! Search roots: the page and frame capability the poller drives.
//!
//! A browser adapter implements [`ConsentRoot`] once for pages and once for
//! frames. The poller never branches on which kind it holds.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::result::{ProbeError, ProbeResult};

/// Accessible roles the poller queries for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// `button`
    Button,
}

impl AriaRole {
    /// ARIA role name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
        }
    }
}

impl std::fmt::Display for AriaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient handle to an element returned by a root query.
///
/// Only valid until the document changes; callers re-query instead of
/// holding on to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Visible text, if the driver reported it
    pub text_content: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
        }
    }

    /// Attach text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }
}

/// A page or frame the consent poller can search.
#[async_trait]
pub trait ConsentRoot: Send + Sync {
    /// Human-readable label for logs (URL, frame name)
    fn describe(&self) -> String;

    /// First element with `role` whose accessible name matches `name`
    async fn find_by_role(&self, role: AriaRole, name: &Regex)
        -> ProbeResult<Option<ElementHandle>>;

    /// First `tag` element whose visible text matches `text`
    async fn find_by_text(&self, tag: &str, text: &Regex) -> ProbeResult<Option<ElementHandle>>;

    /// Whether the element is currently visible
    async fn is_visible(&self, element: &ElementHandle) -> ProbeResult<bool>;

    /// Click the element
    async fn click(&self, element: &ElementHandle) -> ProbeResult<()>;

    /// Press a key on the owning page's keyboard
    async fn press_key(&self, key: &str) -> ProbeResult<()>;

    /// Frames currently attached directly below this root
    async fn child_frames(&self) -> ProbeResult<Vec<Arc<dyn ConsentRoot>>>;
}

// =============================================================================
// MOCK ROOT
// =============================================================================

/// Element fixture for [`MockRoot`]
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Handle returned by queries
    pub handle: ElementHandle,
    /// Accessible role, if exposed
    pub role: Option<AriaRole>,
    /// Accessible name
    pub accessible_name: String,
    /// Visible text
    pub text: String,
    /// Visibility reported by `is_visible`
    pub visible: bool,
    /// Make `click` fail as if the element detached
    pub detach_on_click: bool,
    /// Number of sweeps (role queries) before the element is injected
    pub appears_after: u32,
}

impl MockElement {
    /// A visible `<button>` with an accessible role and name
    #[must_use]
    pub fn button(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            handle: ElementHandle::new(id, "button").with_text(name.clone()),
            role: Some(AriaRole::Button),
            accessible_name: name.clone(),
            text: name,
            visible: true,
            detach_on_click: false,
            appears_after: 0,
        }
    }

    /// A visible `<button>` that exposes no accessible role or name
    #[must_use]
    pub fn unlabeled_button(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            handle: ElementHandle::new(id, "button").with_text(text.clone()),
            role: None,
            accessible_name: String::new(),
            text,
            visible: true,
            detach_on_click: false,
            appears_after: 0,
        }
    }

    /// Set visibility
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Fail clicks with [`ProbeError::ElementDetached`]
    #[must_use]
    pub const fn detaching(mut self) -> Self {
        self.detach_on_click = true;
        self
    }

    /// Inject the element only after `sweeps` role queries
    #[must_use]
    pub const fn appears_after(mut self, sweeps: u32) -> Self {
        self.appears_after = sweeps;
        self
    }
}

/// In-memory page/frame for unit testing.
///
/// Records every click and key press so tests can assert on interactions.
#[derive(Debug, Default)]
pub struct MockRoot {
    name: String,
    elements: Vec<MockElement>,
    frames: Vec<Arc<MockRoot>>,
    fail_queries: bool,
    role_queries: AtomicU32,
    clicks: Mutex<Vec<String>>,
    keys: Mutex<Vec<String>>,
}

impl MockRoot {
    /// Create an empty root
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an element
    #[must_use]
    pub fn with_element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Attach a child frame
    #[must_use]
    pub fn with_frame(mut self, frame: Arc<Self>) -> Self {
        self.frames.push(frame);
        self
    }

    /// Make every query return a driver error
    #[must_use]
    pub const fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Ids of clicked elements, in order
    #[must_use]
    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Keys pressed, in order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    /// Number of role queries answered so far
    #[must_use]
    pub fn role_queries(&self) -> u32 {
        self.role_queries.load(Ordering::SeqCst)
    }

    fn injected(&self, sweeps_seen: u32) -> impl Iterator<Item = &MockElement> {
        self.elements
            .iter()
            .filter(move |e| e.appears_after <= sweeps_seen)
    }

    fn lookup(&self, handle: &ElementHandle) -> ProbeResult<&MockElement> {
        self.elements
            .iter()
            .find(|e| e.handle.id == handle.id)
            .ok_or_else(|| ProbeError::ElementDetached {
                id: handle.id.clone(),
            })
    }

    fn check_queries(&self) -> ProbeResult<()> {
        if self.fail_queries {
            return Err(ProbeError::driver(format!("{}: query failed", self.name)));
        }
        Ok(())
    }
}

#[async_trait]
impl ConsentRoot for MockRoot {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn find_by_role(
        &self,
        role: AriaRole,
        name: &Regex,
    ) -> ProbeResult<Option<ElementHandle>> {
        let seen = self.role_queries.fetch_add(1, Ordering::SeqCst);
        self.check_queries()?;
        Ok(self
            .injected(seen)
            .find(|e| e.role == Some(role) && name.is_match(&e.accessible_name))
            .map(|e| e.handle.clone()))
    }

    async fn find_by_text(&self, tag: &str, text: &Regex) -> ProbeResult<Option<ElementHandle>> {
        self.check_queries()?;
        let seen = self.role_queries().saturating_sub(1);
        Ok(self
            .injected(seen)
            .find(|e| e.handle.tag_name == tag && text.is_match(&e.text))
            .map(|e| e.handle.clone()))
    }

    async fn is_visible(&self, element: &ElementHandle) -> ProbeResult<bool> {
        Ok(self.lookup(element)?.visible)
    }

    async fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        let fixture = self.lookup(element)?;
        if fixture.detach_on_click {
            return Err(ProbeError::ElementDetached {
                id: element.id.clone(),
            });
        }
        if let Ok(mut clicks) = self.clicks.lock() {
            clicks.push(element.id.clone());
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> ProbeResult<()> {
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key.to_string());
        }
        Ok(())
    }

    async fn child_frames(&self) -> ProbeResult<Vec<Arc<dyn ConsentRoot>>> {
        self.check_queries()?;
        Ok(self
            .frames
            .iter()
            .map(|f| Arc::clone(f) as Arc<dyn ConsentRoot>)
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn any() -> Regex {
        Regex::new(".*").unwrap()
    }

    #[test]
    fn test_aria_role_names() {
        assert_eq!(AriaRole::Button.as_str(), "button");
        assert_eq!(AriaRole::Button.to_string(), "button");
    }

    #[test]
    fn test_element_handle_builder() {
        let handle = ElementHandle::new("btn-1", "button").with_text("Accept");
        assert_eq!(handle.id, "btn-1");
        assert_eq!(handle.tag_name, "button");
        assert_eq!(handle.text_content.as_deref(), Some("Accept"));
    }

    #[tokio::test]
    async fn test_mock_role_query_respects_role() {
        let root = MockRoot::new("page")
            .with_element(MockElement::unlabeled_button("plain", "Accept"))
            .with_element(MockElement::button("labeled", "Accept"));
        let found = root.find_by_role(AriaRole::Button, &any()).await.unwrap();
        assert_eq!(found.unwrap().id, "labeled");
    }

    #[tokio::test]
    async fn test_mock_element_injection_is_delayed() {
        let root =
            MockRoot::new("page").with_element(MockElement::button("late", "Accept").appears_after(2));
        assert!(root.find_by_role(AriaRole::Button, &any()).await.unwrap().is_none());
        assert!(root.find_by_role(AriaRole::Button, &any()).await.unwrap().is_none());
        assert!(root.find_by_role(AriaRole::Button, &any()).await.unwrap().is_some());
        assert_eq!(root.role_queries(), 3);
    }

    #[tokio::test]
    async fn test_mock_click_records_and_detaches() {
        let root = MockRoot::new("page")
            .with_element(MockElement::button("ok", "Accept"))
            .with_element(MockElement::button("gone", "Consent").detaching());
        root.click(&ElementHandle::new("ok", "button")).await.unwrap();
        let err = root
            .click(&ElementHandle::new("gone", "button"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::ElementDetached { .. }));
        assert_eq!(root.clicks(), ["ok".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_unknown_handle_is_detached() {
        let root = MockRoot::new("page");
        let result = root.is_visible(&ElementHandle::new("nope", "button")).await;
        assert!(matches!(result, Err(ProbeError::ElementDetached { .. })));
    }

    #[tokio::test]
    async fn test_mock_failing_queries() {
        let root = MockRoot::new("broken").failing_queries();
        assert!(root.find_by_role(AriaRole::Button, &any()).await.is_err());
        assert!(root.find_by_text("button", &any()).await.is_err());
        assert!(root.child_frames().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_child_frames() {
        let frame = Arc::new(MockRoot::new("cmp-frame"));
        let page = MockRoot::new("page").with_frame(frame);
        let frames = page.child_frames().await.unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].describe(), "cmp-frame");
    }
}
