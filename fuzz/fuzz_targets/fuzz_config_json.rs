#![no_main]

use libfuzzer_sys::fuzz_target;
use vcptune::config::AppConfig;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as JSON into AppConfig
    // This tests for crashes, panics, and undefined behavior
    if let Ok(s) = std::str::from_utf8(data) {
        let result: Result<AppConfig, _> = serde_json::from_str(s);
        // Parsed configs must also survive validation without panicking
        if let Ok(config) = result {
            let _ = config.validate();
        }
    }
});
