use crate::section::section_header;
use crate::settings::{InstallSettings, Platform};

/// Table name of the server entry inside the Codex config.
pub const SECTION_NAME: &str = "mcp_servers.openmemory-local";
/// Client segment of the gateway SSE route.
pub const CLIENT_NAME: &str = "codex";

const LAUNCHER: &str = "npx";
const GATEWAY_PACKAGE: &str = "supergateway";
const STARTUP_TIMEOUT_MS: &str = "20_000";

/// Gateway endpoint the launcher bridges to: `{api_base}/mcp/codex/sse/{user_id}`.
pub fn sse_url(settings: &InstallSettings) -> String {
    format!("{}/mcp/{}/sse/{}", settings.api_base, CLIENT_NAME, settings.user_id)
}

/// Renders the full `[mcp_servers.openmemory-local]` table, newline-terminated.
pub fn build_snippet(settings: &InstallSettings) -> String {
    let url = sse_url(settings);
    let mut args: Vec<&str> = Vec::new();
    if settings.platform == Platform::Windows {
        args.extend(["/c", LAUNCHER]);
    }
    args.extend(["-y", GATEWAY_PACKAGE, "--sse", url.as_str()]);

    let command = match settings.platform {
        Platform::Unix => LAUNCHER,
        Platform::Windows => "cmd",
    };

    let mut out = String::new();
    out.push_str(&section_header(SECTION_NAME));
    out.push('\n');
    out.push_str(&format!("command = \"{}\"\n", command));
    out.push_str("args = [\n");
    let quoted: Vec<String> = args.iter().map(|a| format!("    \"{}\"", a)).collect();
    out.push_str(&quoted.join(",\n"));
    out.push_str("\n]\n");
    if settings.platform == Platform::Windows {
        out.push_str(r#"env = { SystemRoot="C:\\Windows" }"#);
        out.push('\n');
    }
    out.push_str(&format!("startup_timeout_ms = {}\n", STARTUP_TIMEOUT_MS));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(platform: Platform) -> InstallSettings {
        InstallSettings::new("http://localhost:8765/", "alice", platform).unwrap()
    }

    #[test]
    fn test_unix_snippet() {
        let expected = "[mcp_servers.openmemory-local]\n\
                        command = \"npx\"\n\
                        args = [\n    \"-y\",\n    \"supergateway\",\n    \"--sse\",\n    \
                        \"http://localhost:8765/mcp/codex/sse/alice\"\n]\n\
                        startup_timeout_ms = 20_000\n";
        assert_eq!(build_snippet(&settings(Platform::Unix)), expected);
    }

    #[test]
    fn test_windows_snippet() {
        let snippet = build_snippet(&settings(Platform::Windows));
        assert!(snippet.starts_with("[mcp_servers.openmemory-local]\ncommand = \"cmd\"\n"));
        assert!(snippet.contains("args = [\n    \"/c\",\n    \"npx\",\n    \"-y\",\n"));
        assert!(snippet.contains("env = { SystemRoot=\"C:\\\\Windows\" }\n"));
        assert!(snippet.ends_with("startup_timeout_ms = 20_000\n"));
    }

    #[test]
    fn test_url_embedded_without_double_slash() {
        let s = settings(Platform::Unix);
        assert_eq!(sse_url(&s), "http://localhost:8765/mcp/codex/sse/alice");
        assert!(build_snippet(&s).contains("\"http://localhost:8765/mcp/codex/sse/alice\""));
        assert!(!build_snippet(&s).contains("8765//"));
    }

    #[test]
    fn test_snippet_is_valid_toml() {
        for platform in [Platform::Unix, Platform::Windows] {
            let doc: toml::Table = build_snippet(&settings(platform)).parse().unwrap();
            let server = &doc["mcp_servers"]["openmemory-local"];
            assert_eq!(server["startup_timeout_ms"].as_integer(), Some(20_000));
            let args = server["args"].as_array().unwrap();
            assert_eq!(
                args.last().and_then(|v| v.as_str()),
                Some("http://localhost:8765/mcp/codex/sse/alice")
            );
        }
        let doc: toml::Table = build_snippet(&settings(Platform::Windows)).parse().unwrap();
        assert_eq!(
            doc["mcp_servers"]["openmemory-local"]["env"]["SystemRoot"].as_str(),
            Some("C:\\Windows")
        );
    }
}
