//! WASM build test
//!
//! Exercises the JavaScript-facing API in a browser.
#![cfg(target_arch = "wasm32")]

use lyric_stage_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

fn video_json() -> JsValue {
    js(r#"{
        "duration": 10000,
        "phrases": [
            { "words": [ { "pos": "V", "language": "ja",
                           "chars": [ { "text": "輝", "startTime": 1000 },
                                      { "text": "い", "startTime": 1100 },
                                      { "text": "て", "startTime": 1200 } ] } ] }
        ],
        "beats": [ { "startTime": 0, "duration": 500 } ]
    }"#)
}

#[wasm_bindgen_test]
fn test_configure_with_defaults() {
    assert!(configure_stage(JsValue::UNDEFINED).is_ok());
}

#[wasm_bindgen_test]
fn test_tick_before_video_is_skipped() {
    media_changed().unwrap();
    let frame = time_update(0.0).unwrap();
    let skipped = js_sys::Reflect::get(&frame, &JsValue::from_str("skipped")).unwrap();
    assert_eq!(skipped.as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn test_load_and_tick() {
    configure_stage(JsValue::NULL).unwrap();
    load_video(video_json()).unwrap();

    let frame = time_update(600.0).unwrap();
    let reveals = js_sys::Reflect::get(&frame, &JsValue::from_str("reveals")).unwrap();
    let reveals = js_sys::Array::from(&reveals);
    assert_eq!(reveals.length(), 1);

    let color = js_sys::Reflect::get(&reveals.get(0), &JsValue::from_str("colorIndex")).unwrap();
    assert_eq!(color.as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn test_invalid_config_rejected() {
    let bad = js(r#"{ "rainbow": { "paletteLen": 0 } }"#);
    assert!(configure_stage(bad).is_err());
}

#[wasm_bindgen_test]
fn test_configure_from_text() {
    assert!(configure_stage_from_text("rainbow:\n  paletteLen: 3\n", "yaml").is_ok());
    assert!(configure_stage_from_text(r#"{ "cursor": { "lookaheadMs": 250 } }"#, "json").is_ok());
    assert!(configure_stage_from_text("{}", "toml").is_err());
    assert!(configure_stage_from_text(r#"{ "wave": { "step": 0 } }"#, "json").is_err());
    configure_stage(JsValue::NULL).unwrap();
}

#[wasm_bindgen_test]
fn test_stop_clears_and_replays() {
    configure_stage(JsValue::NULL).unwrap();
    load_video(video_json()).unwrap();
    time_update(1500.0).unwrap();

    playback_stopped().unwrap();
    let frame = time_update(1500.0).unwrap();
    let reset = js_sys::Reflect::get(&frame, &JsValue::from_str("reset")).unwrap();
    assert_eq!(reset.as_bool(), Some(true));
    let reveals = js_sys::Reflect::get(&frame, &JsValue::from_str("reveals")).unwrap();
    assert_eq!(js_sys::Array::from(&reveals).length(), 3);
}
