//! [`PaymentRedirect`]-related definitions.

use derive_more::From;
use juniper::{graphql_object, GraphQLObject};
use service::domain;

use crate::{Context, Error};

/// Redirect of a browser to the payment gateway.
#[derive(Clone, Debug, From)]
pub struct PaymentRedirect(domain::PaymentRedirect);

/// Redirect of a browser to the payment gateway.
///
/// The browser is expected to `POST` all the `fields` to the `url` as is.
#[graphql_object(context = Context)]
impl PaymentRedirect {
    /// URL of the payment gateway.
    pub fn url(&self) -> &str {
        self.0.url.as_str()
    }

    /// Ordered form fields to submit to the payment gateway.
    pub fn fields(&self) -> Vec<PaymentField> {
        self.0
            .fields
            .iter()
            .map(|(name, value)| PaymentField {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }

    /// HTML document submitting the `fields` to the `url` once loaded.
    pub fn html(&self, ctx: &Context) -> Result<String, Error> {
        self.0
            .to_html()
            .map_err(|e| Error::internal(&e))
            .map_err(ctx.error())
    }
}

/// Single form field of a `PaymentRedirect`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct PaymentField {
    /// Name of this field.
    pub name: String,

    /// Value of this field.
    pub value: String,
}
