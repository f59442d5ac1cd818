//! REST [`Backend`] implementation.

use std::{fmt, time::Duration};

use common::{
    operations::{By, Insert, Select, Start},
    Date, Money, Percent,
};
use derive_more::{Display, Error as StdError, From};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{
        accommodation::{self, Capacity, RoomCount},
        activity,
        booking::{Reference, Submission},
        coupon::{self, Applicability, Discount},
        date_override::ExtraRooms,
        Accommodation, Activity, Coupon, DateOverride, Occupancy, Overrides,
        PaymentRedirect, PaymentRequest,
    },
    infra::{backend, Backend},
};

/// [`Rest`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base [`Url`] of the backend API.
    pub base_url: Url,

    /// Bearer token to authorize requests with, if any.
    pub api_token: Option<SecretString>,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Backend`] reached over its REST API.
#[derive(Clone, Debug)]
pub struct Rest {
    /// HTTP [`Client`] performing requests.
    client: Client,

    /// Base [`Url`] of the backend API.
    base_url: Url,

    /// Bearer token to authorize requests with, if any.
    api_token: Option<SecretString>,
}

impl Rest {
    /// Creates a new [`Rest`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the base [`Url`] cannot have path segments, or the HTTP [`Client`]
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self, Traced<backend::Error>> {
        let Config {
            base_url,
            api_token,
            timeout,
        } = config;
        if base_url.cannot_be_a_base() {
            return Err(tracerr::new!(backend::Error::from(
                Error::InvalidBaseUrl(base_url),
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    /// Builds an endpoint [`Url`] out of the provided path segments,
    /// percent-encoding each of them.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            _ = path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Prepares a request to the provided endpoint.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.api_token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Sends the provided request and decodes its JSON response.
    ///
    /// [`None`] is returned on `404 Not Found` response.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<T>, Traced<Error>> {
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            log::warn!("backend `{endpoint}` responded with `{status}`");
            return Err(tracerr::new!(Error::Status {
                endpoint: endpoint.to_owned(),
                status: status.as_u16(),
            }));
        }

        resp.json()
            .await
            .map(Some)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Performs a `GET` request to the provided endpoint.
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Option<T>, Traced<Error>> {
        let url = self.endpoint(segments);
        let endpoint = url.path().to_owned();
        let req = self.request(Method::GET, url).query(query);
        self.send(req, &endpoint).await.map_err(tracerr::wrap!())
    }

    /// Performs a `POST` request with the provided JSON `body`.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Traced<Error>> {
        let url = self.endpoint(segments);
        let endpoint = url.path().to_owned();
        let req = self.request(Method::POST, url).json(body);
        self.send(req, &endpoint)
            .await
            .map_err(tracerr::wrap!())?
            .ok_or_else(|| {
                tracerr::new!(Error::Status {
                    endpoint,
                    status: StatusCode::NOT_FOUND.as_u16(),
                })
            })
    }
}

/// [`Rest`] backend error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Base [`Url`] cannot be used for building endpoints.
    #[display("`{_0}` cannot be a base URL")]
    #[from(ignore)]
    InvalidBaseUrl(#[error(not(source))] Url),

    /// Failed to perform a request or decode its response.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Backend responded with an unsuccessful status.
    #[display("`{endpoint}` responded with `{status}` status")]
    #[from(ignore)]
    Status {
        /// Path of the requested endpoint.
        endpoint: String,

        /// Returned HTTP status code.
        status: u16,
    },

    /// Backend returned data violating the domain invariants.
    #[display("`{entity}` is malformed: {reason}")]
    #[from(ignore)]
    Malformed {
        /// Name of the malformed entity.
        entity: &'static str,

        /// Description of the violation.
        reason: String,
    },
}

impl Error {
    /// Creates a new [`Error::Malformed`].
    fn malformed(entity: &'static str, reason: impl fmt::Display) -> Self {
        Self::Malformed {
            entity,
            reason: reason.to_string(),
        }
    }
}

/// Accommodation as returned by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccommodationDto {
    id: accommodation::Id,
    name: String,
    rooms: RoomCount,
    adult_rate: Decimal,
    child_rate: Decimal,
    capacity: u16,
    #[serde(default)]
    activities: Vec<ActivityDto>,
}

/// Activity as returned by the backend.
#[derive(Debug, Deserialize)]
struct ActivityDto {
    id: activity::Id,
    name: String,
    price: Decimal,
}

impl TryFrom<AccommodationDto> for Accommodation {
    type Error = Error;

    fn try_from(dto: AccommodationDto) -> Result<Self, Self::Error> {
        const ENTITY: &str = "Accommodation";

        Ok(Self {
            id: dto.id,
            name: accommodation::Name::new(dto.name)
                .ok_or_else(|| Error::malformed(ENTITY, "invalid `name`"))?,
            rooms: dto.rooms,
            adult_rate: Money::inr(dto.adult_rate),
            child_rate: Money::inr(dto.child_rate),
            capacity: Capacity::new(dto.capacity)
                .ok_or_else(|| Error::malformed(ENTITY, "zero `capacity`"))?,
            activities: dto
                .activities
                .into_iter()
                .map(|a| {
                    Ok(Activity {
                        id: a.id,
                        name: activity::Name::new(a.name).ok_or_else(
                            || Error::malformed(ENTITY, "invalid activity"),
                        )?,
                        price: Money::inr(a.price),
                    })
                })
                .collect::<Result<_, Error>>()?,
        })
    }
}

/// Date-specific override as returned by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateOverrideDto {
    date: Date,
    #[serde(default, alias = "extraRooms")]
    rooms: ExtraRooms,
    #[serde(default)]
    adult_rate: Option<Decimal>,
    #[serde(default)]
    child_rate: Option<Decimal>,
}

impl From<DateOverrideDto> for DateOverride {
    fn from(dto: DateOverrideDto) -> Self {
        Self {
            date: dto.date,
            extra_rooms: dto.rooms,
            adult_rate: dto.adult_rate.map(Money::inr),
            child_rate: dto.child_rate.map(Money::inr),
        }
    }
}

/// Occupancy as returned by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OccupancyDto {
    booked_rooms: i64,
}

/// Kind of a coupon discount as returned by the backend.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DiscountKind {
    Fixed,
    Percentage,
}

/// Coupon as returned by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CouponDto {
    code: String,
    discount_type: DiscountKind,
    discount: Decimal,
    #[serde(default)]
    min_amount: Option<Decimal>,
    #[serde(default)]
    max_discount: Option<Decimal>,
    #[serde(with = "common::datetime::serde::rfc3339")]
    expires_at: coupon::ExpirationDateTime,
    #[serde(default)]
    accommodation_id: Option<accommodation::Id>,
}

impl TryFrom<CouponDto> for Coupon {
    type Error = Error;

    fn try_from(dto: CouponDto) -> Result<Self, Self::Error> {
        const ENTITY: &str = "Coupon";

        let discount = match dto.discount_type {
            DiscountKind::Fixed => Discount::Fixed(Money::inr(dto.discount)),
            DiscountKind::Percentage => Discount::Percentage {
                percent: Percent::new(dto.discount).ok_or_else(|| {
                    Error::malformed(ENTITY, "percentage out of range")
                })?,
                max: dto.max_discount.map(Money::inr),
            },
        };
        Ok(Self {
            code: coupon::Code::new(&dto.code)
                .ok_or_else(|| Error::malformed(ENTITY, "invalid `code`"))?,
            discount,
            min_amount: Money::inr(dto.min_amount.unwrap_or_default()),
            expires_at: dto.expires_at,
            applicability: dto
                .accommodation_id
                .map_or(Applicability::All, Applicability::Accommodation),
        })
    }
}

/// Booking creation request sent to the backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingDto<'a> {
    accommodation_id: accommodation::Id,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    check_in: Date,
    check_out: Date,
    rooms: Vec<RoomDto>,
    food: FoodDto,
    activities: &'a [activity::Id],
    coupon_code: Option<&'a str>,
    adults: u32,
    children: u32,
    subtotal: Decimal,
    discount: Decimal,
    total: Decimal,
    advance: Decimal,
    balance: Decimal,
}

/// Guests of a single room sent to the backend.
#[derive(Debug, Serialize)]
struct RoomDto {
    adults: u16,
    children: u16,
}

/// Meal counts sent to the backend.
#[derive(Debug, Serialize)]
struct FoodDto {
    veg: u32,
    nonveg: u32,
    jain: u32,
}

impl<'a> From<&'a Submission> for BookingDto<'a> {
    fn from(s: &'a Submission) -> Self {
        Self {
            accommodation_id: s.accommodation_id,
            name: s.contact.name.as_ref(),
            email: s.contact.email.as_ref(),
            phone: s.contact.phone.as_ref(),
            check_in: s.check_in,
            check_out: s.check_out,
            rooms: s
                .rooms
                .iter()
                .map(|r| RoomDto {
                    adults: r.adults(),
                    children: r.children(),
                })
                .collect(),
            food: FoodDto {
                veg: s.food.veg,
                nonveg: s.food.nonveg,
                jain: s.food.jain,
            },
            activities: &s.activities,
            coupon_code: s.coupon.as_ref().map(AsRef::as_ref),
            adults: s.quote.adults,
            children: s.quote.children,
            subtotal: s.quote.subtotal.amount,
            discount: s.quote.discount.amount,
            total: s.quote.total.amount,
            advance: s.quote.advance.amount,
            balance: s.quote.balance.amount,
        }
    }
}

/// Booking creation response of the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingCreatedDto {
    booking_id: String,
}

/// Payment initiation request sent to the backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentDto<'a> {
    booking_id: &'a str,
    amount: Decimal,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    check_in: Date,
}

/// Payment redirect as returned by the backend.
#[derive(Debug, Deserialize)]
struct PaymentRedirectDto {
    url: Url,
    fields: OrderedFields,
}

/// Form fields of a [`PaymentRedirectDto`], in the order they were received.
#[derive(Debug, Default)]
struct OrderedFields(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// [`de::Visitor`] collecting map entries in order.
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = OrderedFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of form fields")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut fields =
                    Vec::with_capacity(map.size_hint().unwrap_or_default());
                while let Some((name, FieldValue(value))) = map.next_entry()? {
                    fields.push((name, value));
                }
                Ok(OrderedFields(fields))
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}

/// Scalar form field value, kept as its textual representation.
struct FieldValue(String);

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// [`de::Visitor`] stringifying any scalar.
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar form field value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_owned()))
            }

            fn visit_string<E: de::Error>(
                self,
                v: String,
            ) -> Result<Self::Value, E> {
                Ok(FieldValue(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_bool<E: de::Error>(
                self,
                v: bool,
            ) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FieldValue(String::new()))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl Backend<Select<By<Option<Accommodation>, accommodation::Id>>> for Rest {
    type Ok = Option<Accommodation>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Accommodation>, accommodation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner().to_string();
        self.get::<AccommodationDto>(&["accommodations", &id], &[])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .map(Accommodation::try_from)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Backend<Select<By<Overrides, accommodation::Id>>> for Rest {
    type Ok = Overrides;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Overrides, accommodation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner().to_string();
        Ok(self
            .get::<Vec<DateOverrideDto>>(
                &["accommodations", &id, "overrides"],
                &[],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .unwrap_or_default()
            .into_iter()
            .map(DateOverride::from)
            .collect())
    }
}

impl Backend<Select<By<Occupancy, (accommodation::Id, Date)>>> for Rest {
    type Ok = Occupancy;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Occupancy, (accommodation::Id, Date)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (id, date) = by.into_inner();
        let id = id.to_string();
        let booked = self
            .get::<OccupancyDto>(
                &["accommodations", &id, "occupancy"],
                &[("date", date.to_string())],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .map_or(0, |o| o.booked_rooms);

        Ok(Occupancy {
            date,
            booked: RoomCount::saturating_from(booked),
        })
    }
}

impl Backend<Select<By<Option<Coupon>, coupon::Code>>> for Rest {
    type Ok = Option<Coupon>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Coupon>, coupon::Code>>,
    ) -> Result<Self::Ok, Self::Err> {
        let code = by.into_inner();
        self.get::<CouponDto>(&["coupons", code.as_ref()], &[])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .map(Coupon::try_from)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Backend<Insert<Submission>> for Rest {
    type Ok = Reference;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(submission): Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        let created = self
            .post::<_, BookingCreatedDto>(
                &["bookings"],
                &BookingDto::from(&submission),
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        Reference::new(created.booking_id)
            .ok_or_else(|| Error::malformed("Booking", "blank `bookingId`"))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Backend<Start<PaymentRequest>> for Rest {
    type Ok = PaymentRedirect;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Start(req): Start<PaymentRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = PaymentDto {
            booking_id: req.reference.as_ref(),
            amount: req.amount.amount,
            name: req.contact.name.as_ref(),
            email: req.contact.email.as_ref(),
            phone: req.contact.phone.as_ref(),
            check_in: req.check_in,
        };
        let redirect = self
            .post::<_, PaymentRedirectDto>(&["payments"], &body)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        log::debug!(
            "payment of booking `{}` redirects to `{}`",
            req.reference,
            redirect.url,
        );
        Ok(PaymentRedirect {
            url: redirect.url,
            fields: redirect.fields.0,
        })
    }
}
