#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlbox::{json, CdataStrategy, Encoder, FormatConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = json::from_str(s) {
            let config = FormatConfig::default().pretty_print(true).sort_keys(true);
            let _ = Encoder::new()
                .format(config)
                .cdata(CdataStrategy::Always)
                .encode("root", &value);
            let element = Encoder::new().build("root", &value);
            let _ = element.to_box();
        }
    }
});
