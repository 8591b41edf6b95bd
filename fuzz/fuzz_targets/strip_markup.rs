//! Fuzz target for the plain-text projection.
//!
//! Checks the properties callers rely on: the output never grows, never
//! contains a tag delimiter, and stripping twice changes nothing.

#![no_main]

use libfuzzer_sys::fuzz_target;

use courier_mail::strip_markup;

fuzz_target!(|html: &str| {
    let text = strip_markup(html);

    assert!(text.len() <= html.len());
    assert!(!text.contains('<') && !text.contains('>'));
    assert_eq!(strip_markup(&text), text);

    if !html.contains('<') && !html.contains('>') {
        assert_eq!(text, html);
    }
});
