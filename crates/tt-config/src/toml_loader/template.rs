//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# TinyTorrent native host configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[daemon]
# host = "127.0.0.1"
# port = 0                     # 0 = wait for --port
# token = ""                   # sent as X-TT-Auth
# request_timeout_ms = 5000    # 250-60000

[window]
# title = "TinyTorrent"
# width = 1280                 # 320-16384
# height = 800                 # 240-16384
# min_width = 640
# min_height = 480
# close_to_tray = false

[engine]
# prefer_composition = true    # false = always host directly in the window
# user_data_dir = ""           # empty = <data dir>/WebView2
# devtools = false

[startup]
# auto_open = true
# show_splash = true
# splash_message = ""
# handshake_timeout_ms = 15000 # 1000-120000
# poll_interval_ms = 1000      # 100-60000

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
    .to_string()
}
