//! [`ContactLinks`]-related definitions.

use juniper::graphql_object;
use service::domain;

use crate::Context;

/// Ways to reach the resort.
#[derive(Clone, Copy, Debug)]
pub struct ContactLinks;

/// Ways to reach the resort.
#[graphql_object(context = Context)]
impl ContactLinks {
    /// Phone number of the resort.
    pub fn phone(ctx: &Context) -> String {
        ctx.contact().phone.to_string()
    }

    /// Email address of the resort.
    pub fn email(ctx: &Context) -> String {
        ctx.contact().email.to_string()
    }

    /// WhatsApp chat link with a pre-filled greeting.
    pub fn whatsapp(ctx: &Context) -> String {
        ctx.contact().whatsapp()
    }

    /// `tel:` link calling the resort.
    pub fn tel(ctx: &Context) -> String {
        ctx.contact().tel()
    }

    /// `mailto:` link writing to the resort.
    pub fn mailto(ctx: &Context) -> String {
        ctx.contact().mailto()
    }
}

/// Builds [`domain::ContactLinks`] out of the provided configuration.
///
/// [`None`] is returned if the configured phone or email is invalid.
#[must_use]
pub fn links(config: &crate::config::Contact) -> Option<domain::ContactLinks> {
    Some(domain::ContactLinks {
        phone: config.phone.parse().ok()?,
        email: config.email.parse().ok()?,
        whatsapp_message: config.whatsapp_message.clone(),
    })
}

#[cfg(test)]
mod spec {
    use crate::config::Contact;

    use super::links;

    #[test]
    fn builds_links_from_config() {
        let built = links(&Contact::default()).unwrap();
        assert_eq!(built.tel(), "tel:+919822000000");
        assert!(built
            .whatsapp()
            .starts_with("https://wa.me/919822000000?text=Hi%21"));

        assert!(links(&Contact {
            email: "not an email".into(),
            ..Contact::default()
        })
        .is_none());
    }
}
