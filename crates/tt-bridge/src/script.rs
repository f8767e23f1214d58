//! Document scripts and host events injected into the content.

use serde_json::{json, Value};

use crate::message::BridgeMessage;

/// Installs `window.__ttHost`, one channel over both engines' native
/// message APIs.
///
/// Outgoing messages use `window.ipc` (direct engine) when present and
/// `chrome.webview` (composed engine) otherwise. Incoming messages arrive
/// through `chrome.webview` message events or `__ttHost._deliver`.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function () {
  if (window.__ttHost) return;
  var listeners = [];
  function deliver(data) {
    var msg = data;
    if (typeof msg === 'string') {
      try { msg = JSON.parse(msg); } catch (e) { return; }
    }
    for (var i = 0; i < listeners.length; i++) {
      try { listeners[i](msg); } catch (e) { console.error(e); }
    }
  }
  var webview = window.chrome && window.chrome.webview;
  if (webview && typeof webview.addEventListener === 'function') {
    webview.addEventListener('message', function (ev) { deliver(ev.data); });
  }
  window.__ttHost = {
    postMessage: function (obj) {
      if (window.ipc && typeof window.ipc.postMessage === 'function') {
        window.ipc.postMessage(JSON.stringify(obj));
      } else if (webview) {
        webview.postMessage(obj);
      }
    },
    addEventListener: function (fn) {
      if (typeof fn === 'function') listeners.push(fn);
    },
    removeEventListener: function (fn) {
      listeners = listeners.filter(function (l) { return l !== fn; });
    },
    _deliver: deliver
  };
})();
"#;

/// Publishes native host info and the auth token before any page script
/// runs.
pub fn native_info_script(host: &str, port: u16, token: &str) -> String {
    let info = json!({
        "token": token,
        "host": host,
        "port": port.to_string(),
        "scheme": "http",
    });
    let token_literal = Value::String(token.to_string());

    format!(
        r#"(function () {{
  window.__TINY_TORRENT_NATIVE__ = true;
  window.__TINY_TORRENT_NATIVE_INFO__ = {info};
  try {{
    var token = {token_literal};
    if (token) {{
      sessionStorage.setItem('tt-auth-token', token);
    }} else {{
      sessionStorage.removeItem('tt-auth-token');
    }}
  }} catch (e) {{}}
}})();"#
    )
}

/// Script that hands an encoded envelope to the content listeners.
///
/// Used by engines without a native host-to-content message API.
pub fn deliver_script(json: &str) -> String {
    let literal = Value::String(json.to_string());
    format!("window.__ttHost && window.__ttHost._deliver({literal});")
}

/// The `auth-token` event pushed after every navigation completion.
///
/// Returns `None` when there is no token to share.
pub fn auth_token_event(token: &str, host: &str, port: u16) -> Option<BridgeMessage> {
    if token.is_empty() {
        return None;
    }
    Some(BridgeMessage::event(
        "auth-token",
        json!({
            "token": token,
            "host": host,
            "port": port.to_string(),
            "scheme": "http",
        }),
    ))
}

// =============================================================================
// TESTS
// =============================================================================
