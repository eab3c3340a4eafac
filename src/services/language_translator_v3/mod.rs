//! 语言翻译服务 v3 绑定。
//!
//! Language Translator V3.
//!
//! ```no_run
//! use ai_service_rust::services::language_translator_v3::{LanguageTranslatorV3, TranslateOptions};
//!
//! # async fn run() -> ai_service_rust::Result<()> {
//! let client = LanguageTranslatorV3::builder()
//!     .version("2018-05-01")
//!     .iam_api_key("my-api-key")
//!     .build()?;
//! let translator = LanguageTranslatorV3::new(client);
//!
//! let response = translator
//!     .translate(TranslateOptions::new(["Hello"]).model_id("en-es"))
//!     .await?;
//! println!("{}", response.result.translations[0].translation);
//! # Ok(())
//! # }
//! ```

mod models;
mod options;

pub use models::{
    DeleteModelResult, IdentifiableLanguage, IdentifiableLanguages, IdentifiedLanguage,
    IdentifiedLanguages, Translation, TranslationModel, TranslationModels, TranslationResult,
};
pub use options::{
    CreateModelOptions, DeleteModelOptions, GetModelOptions, IdentifyOptions,
    ListIdentifiableLanguagesOptions, ListModelsOptions, TranslateOptions,
};

use crate::client::{DetailedResponse, ServiceClient, ServiceClientBuilder};
use crate::request::Method;
use crate::{Error, ErrorContext, Result};

/// Name used for `LANGUAGE_TRANSLATOR_*` environment variables.
pub const SERVICE_NAME: &str = "language_translator";
pub const DEFAULT_SERVICE_URL: &str = "https://gateway.watsonplatform.net/language-translator/api";

const NO_PARAMS: [&str; 0] = [];
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct LanguageTranslatorV3 {
    client: ServiceClient,
}

impl LanguageTranslatorV3 {
    /// Client builder preset with the service name and default endpoint.
    pub fn builder() -> ServiceClientBuilder {
        ServiceClientBuilder::new(SERVICE_NAME).default_url(DEFAULT_SERVICE_URL)
    }

    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Translate one or more input texts.
    pub async fn translate(
        &self,
        options: TranslateOptions,
    ) -> Result<DetailedResponse<TranslationResult>> {
        if options.text.is_empty() {
            return Err(required("text"));
        }
        let mut builder = self
            .client
            .request_builder(Method::POST, &["v3/translate"], &NO_PARAMS)?;
        builder.set_json_body(&options)?;
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    /// Identify the language of `text`.
    pub async fn identify(
        &self,
        options: IdentifyOptions,
    ) -> Result<DetailedResponse<IdentifiedLanguages>> {
        if options.text.is_empty() {
            return Err(required("text"));
        }
        let mut builder = self
            .client
            .request_builder(Method::POST, &["v3/identify"], &NO_PARAMS)?;
        builder.set_raw_body("text/plain", options.text)?;
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    pub async fn list_identifiable_languages(
        &self,
        options: ListIdentifiableLanguagesOptions,
    ) -> Result<DetailedResponse<IdentifiableLanguages>> {
        let mut builder = self.client.request_builder(
            Method::GET,
            &["v3/identifiable_languages"],
            &NO_PARAMS,
        )?;
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    /// Upload a forced glossary and/or parallel corpus to customize `base_model_id`.
    pub async fn create_model(
        &self,
        options: CreateModelOptions,
    ) -> Result<DetailedResponse<TranslationModel>> {
        if options.base_model_id.trim().is_empty() {
            return Err(required("base_model_id"));
        }
        if options.forced_glossary.is_none() && options.parallel_corpus.is_none() {
            return Err(Error::configuration_with_context(
                "At least one of forced_glossary or parallel_corpus must be supplied",
                ErrorContext::new()
                    .with_field_path("forced_glossary")
                    .with_source(SERVICE_NAME),
            ));
        }

        let mut builder = self
            .client
            .request_builder(Method::POST, &["v3/models"], &NO_PARAMS)?;
        builder.add_query("base_model_id", options.base_model_id);
        if let Some(name) = options.name {
            builder.add_query("name", name);
        }
        if let Some(glossary) = options.forced_glossary {
            builder.set_form_data_part(
                "forced_glossary",
                options.forced_glossary_filename,
                OCTET_STREAM,
                glossary,
            )?;
        }
        if let Some(corpus) = options.parallel_corpus {
            builder.set_form_data_part(
                "parallel_corpus",
                options.parallel_corpus_filename,
                OCTET_STREAM,
                corpus,
            )?;
        }
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    pub async fn delete_model(
        &self,
        options: DeleteModelOptions,
    ) -> Result<DetailedResponse<DeleteModelResult>> {
        let mut builder =
            self.client
                .request_builder(Method::DELETE, &["v3/models"], &[&options.model_id])?;
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    pub async fn get_model(
        &self,
        options: GetModelOptions,
    ) -> Result<DetailedResponse<TranslationModel>> {
        let mut builder =
            self.client
                .request_builder(Method::GET, &["v3/models"], &[&options.model_id])?;
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }

    /// List models, optionally filtered by language pair or default status.
    pub async fn list_models(
        &self,
        options: ListModelsOptions,
    ) -> Result<DetailedResponse<TranslationModels>> {
        let mut builder = self
            .client
            .request_builder(Method::GET, &["v3/models"], &NO_PARAMS)?;
        if let Some(source) = options.source {
            builder.add_query("source", source);
        }
        if let Some(target) = options.target {
            builder.add_query("target", target);
        }
        if let Some(default_models) = options.default_models {
            builder.add_query("default", default_models.to_string());
        }
        builder.header_overrides(options.headers);
        self.client.request(builder.build()?).await
    }
}

fn required(field: &str) -> Error {
    Error::configuration_with_context(
        format!("{} is required", field),
        ErrorContext::new()
            .with_field_path(field)
            .with_source(SERVICE_NAME),
    )
}
