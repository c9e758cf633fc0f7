//! Host runtime handshake for running inside a social client's frame.
//!
//! The host hands out a context (user and client info, including safe-area
//! insets), expects exactly one `ready` signal once the view can render, and
//! asks for its listeners to be removed when the view goes away.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Top padding used when the host does not report one.
pub const DEFAULT_TOP_INSET: u32 = 30;

fn default_top_inset() -> u32 {
    DEFAULT_TOP_INSET
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    #[serde(default = "default_top_inset")]
    pub top: u32,
    #[serde(default)]
    pub bottom: u32,
    #[serde(default)]
    pub left: u32,
    #[serde(default)]
    pub right: u32,
}

impl Default for SafeAreaInsets {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP_INSET,
            bottom: 0,
            left: 0,
            right: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameUser {
    pub fid: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext {
    #[serde(default)]
    pub client_fid: Option<u64>,
    #[serde(default)]
    pub added: bool,
    #[serde(default)]
    pub safe_area_insets: Option<SafeAreaInsets>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    #[serde(default)]
    pub user: Option<FrameUser>,
    #[serde(default)]
    pub client: ClientContext,
}

#[async_trait]
pub trait FrameHost: Send + Sync {
    async fn context(&self) -> anyhow::Result<FrameContext>;
    fn ready(&self);
    fn remove_all_listeners(&self);
}

/// One view's session with the host.
pub struct FrameSession<H: FrameHost> {
    host: H,
    context: Option<FrameContext>,
    ready: bool,
    torn_down: bool,
}

impl<H: FrameHost> FrameSession<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            context: None,
            ready: false,
            torn_down: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Fetch the host context and signal `ready`, both at most once.
    ///
    /// If the context cannot be obtained the session stays un-ready and a
    /// later call retries.
    pub async fn start(&mut self) -> anyhow::Result<&FrameContext> {
        if self.context.is_none() {
            let context = self.host.context().await.map_err(|e| {
                warn!("failed to load frame context: {}", e);
                e
            })?;
            self.context = Some(context);
        }
        if !self.ready {
            self.host.ready();
            self.ready = true;
            debug!("frame ready");
        }
        Ok(self.context.get_or_insert_with(FrameContext::default))
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn context(&self) -> Option<&FrameContext> {
        self.context.as_ref()
    }

    /// Safe-area padding. Sides the host leaves out are 0, except the top,
    /// which falls back to [`DEFAULT_TOP_INSET`].
    pub fn safe_area(&self) -> SafeAreaInsets {
        self.context
            .as_ref()
            .and_then(|c| c.client.safe_area_insets)
            .unwrap_or_default()
    }

    pub fn teardown(&mut self) {
        if !self.torn_down {
            self.host.remove_all_listeners();
            self.torn_down = true;
        }
    }
}

impl<H: FrameHost> Drop for FrameSession<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
