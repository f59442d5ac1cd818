//! Outbound contact links of the resort.

use url::form_urlencoded;

use crate::domain::booking::contact::{Email, Phone};

/// Contact details of the resort, rendered as clickable links.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactLinks {
    /// [`Phone`] of the resort, also used for WhatsApp.
    pub phone: Phone,

    /// [`Email`] of the resort.
    pub email: Email,

    /// Greeting pre-filled into a new WhatsApp chat.
    pub whatsapp_message: String,
}

impl ContactLinks {
    /// Returns a `https://wa.me/` deep link opening a chat with the resort.
    #[must_use]
    pub fn whatsapp(&self) -> String {
        let mut link = format!("https://wa.me/{}", self.phone.digits());
        if !self.whatsapp_message.is_empty() {
            let text = form_urlencoded::byte_serialize(
                self.whatsapp_message.as_bytes(),
            )
            .collect::<String>()
            // Literal `+` is already encoded as `%2B` at this point.
            .replace('+', "%20");
            link.push_str("?text=");
            link.push_str(&text);
        }
        link
    }

    /// Returns a `tel:` link calling the resort.
    #[must_use]
    pub fn tel(&self) -> String {
        format!("tel:{}", self.phone)
    }

    /// Returns a `mailto:` link writing to the resort.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
