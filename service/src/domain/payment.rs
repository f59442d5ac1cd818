//! Payment initiation definitions.

use askama::Template;
use common::{Date, Money};
use url::Url;

use crate::domain::booking::{Contact, Reference};

/// Request to start an online payment of a created booking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentRequest {
    /// [`Reference`] of the paid booking.
    pub reference: Reference,

    /// Amount to be paid online.
    pub amount: Money,

    /// [`Contact`] details of the payer.
    pub contact: Contact,

    /// Check-in [`Date`] of the paid booking.
    pub check_in: Date,
}

/// Redirect of a browser to a payment gateway, as issued by the backend.
///
/// Fields are opaque and must be submitted exactly as received.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentRedirect {
    /// [`Url`] of the payment gateway to submit the fields to.
    pub url: Url,

    /// Ordered form fields to submit.
    pub fields: Vec<(String, String)>,
}

impl PaymentRedirect {
    /// Renders an HTML document with a form that submits itself to the
    /// payment gateway as soon as it's loaded.
    ///
    /// # Errors
    ///
    /// If the HTML template fails to render.
    pub fn to_html(&self) -> askama::Result<String> {
        RedirectForm {
            url: self.url.as_str(),
            fields: &self.fields,
        }
        .render()
    }
}

/// HTML form auto-submitting a [`PaymentRedirect`].
///
/// Every value is HTML-escaped when rendered.
#[derive(Debug, Template)]
#[template(path = "payment_redirect.html")]
struct RedirectForm<'a> {
    /// Action of the form.
    url: &'a str,

    /// Ordered hidden inputs of the form.
    fields: &'a [(String, String)],
}
