//! Fuzz target for recipient address parsing.
//!
//! Arbitrary "Name <user@host>" strings must either fail cleanly or
//! round-trip through Display.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use courier_mail::Address;

#[derive(Debug, Arbitrary)]
struct FuzzAddress {
    name: Option<String>,
    local: String,
    domain: String,
}

fuzz_target!(|data: FuzzAddress| {
    let email = format!("{}@{}", data.local, data.domain);
    let raw = match &data.name {
        Some(name) => format!("{} <{}>", name, email),
        None => email,
    };

    if let Ok(address) = Address::parse(&raw) {
        let reparsed = Address::parse(&address.to_string());
        assert_eq!(reparsed.ok().map(|a| a.email), Some(address.email));
    }
});
