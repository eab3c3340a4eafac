//! Service bindings built on [`ServiceClient`](crate::client::ServiceClient).

pub mod language_translator_v3;
