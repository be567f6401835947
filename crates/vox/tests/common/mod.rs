//! Common test utilities for Vox integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

/// Isolated environment: a throwaway HOME and a clean set of variables
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: tempdir()?,
        })
    }

    /// Command pointed at `api_base` with a test key and no ambient config
    pub fn command(&self, api_base: &str) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vox"));
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("OPENAI_API_KEY", "sk-test");
        cmd.env("OPENAI_API_BASE", api_base);
        cmd.env("VOX_TIMEOUT_SECS", "5");
        cmd.env_remove("VOX_MODEL");
        cmd.env_remove("LANG");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write `~/.vox/config.json`
    pub fn write_config(&self, config: &Value) -> anyhow::Result<()> {
        let dir = self.temp_dir.path().join(".vox");
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("config.json"), serde_json::to_string_pretty(config)?)?;
        Ok(())
    }
}

/// Base URL of a local address nothing listens on
pub fn dead_api_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}/v1", addr)
}

/// Chat-completion body answering with text
pub fn content_body(text: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": text}}]}).to_string()
}

/// Chat-completion body answering with a function call
pub fn function_call_body(name: &str, arguments: Value) -> String {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {"name": name, "arguments": arguments.to_string()}
            }
        }]
    })
    .to_string()
}
