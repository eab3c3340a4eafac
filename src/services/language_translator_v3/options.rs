//! Per-operation options.
//!
//! Every options struct carries a `headers` map of caller-supplied request headers;
//! they are applied last and win over headers the binding sets.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

/// Options for `translate`. Serialized as the JSON request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslateOptions {
    /// Input text in UTF-8; each entry is translated independently.
    pub text: Vec<String>,
    /// Model to use; alternatively give `source` and `target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl TranslateOptions {
    pub fn new<I, S>(text: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Options for `identify`. The text is sent as a `text/plain` body.
#[derive(Debug, Clone, Default)]
pub struct IdentifyOptions {
    pub text: String,
    pub headers: HashMap<String, String>,
}

impl IdentifyOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListIdentifiableLanguagesOptions {
    pub headers: HashMap<String, String>,
}

/// Options for `create_model`.
///
/// At least one of `forced_glossary` or `parallel_corpus` must be given. Both are
/// uploaded as `application/octet-stream` form parts (TMX files).
#[derive(Debug, Clone, Default)]
pub struct CreateModelOptions {
    pub base_model_id: String,
    pub name: Option<String>,
    pub forced_glossary: Option<Bytes>,
    pub forced_glossary_filename: Option<String>,
    pub parallel_corpus: Option<Bytes>,
    pub parallel_corpus_filename: Option<String>,
    pub headers: HashMap<String, String>,
}

impl CreateModelOptions {
    pub fn new(base_model_id: impl Into<String>) -> Self {
        Self {
            base_model_id: base_model_id.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn forced_glossary(mut self, data: impl Into<Bytes>, filename: Option<String>) -> Self {
        self.forced_glossary = Some(data.into());
        self.forced_glossary_filename = filename;
        self
    }

    pub fn parallel_corpus(mut self, data: impl Into<Bytes>, filename: Option<String>) -> Self {
        self.parallel_corpus = Some(data.into());
        self.parallel_corpus_filename = filename;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteModelOptions {
    pub model_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteModelOptions {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetModelOptions {
    pub model_id: String,
    pub headers: HashMap<String, String>,
}

impl GetModelOptions {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            headers: HashMap::new(),
        }
    }
}

/// Filters for `list_models`; unset filters are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct ListModelsOptions {
    pub source: Option<String>,
    pub target: Option<String>,
    /// `true` lists only default models, `false` only non-default ones.
    pub default_models: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl ListModelsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn default_models(mut self, default_models: bool) -> Self {
        self.default_models = Some(default_models);
        self
    }
}
