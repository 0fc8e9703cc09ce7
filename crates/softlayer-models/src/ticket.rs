//! Support tickets.

use crate::model::{models_from_list, Attributes, ModelBase, ModelObject};
use crate::Result;
use chrono::{DateTime, FixedOffset};
use softlayer_client::Client;
use softlayer_core::filter::ApiParameterFilter;
use softlayer_core::types::names;

/// Object mask used when listing tickets.
pub const TICKET_MASK: &str = "mask[id,title,subjectId,statusId,status,assignedUserId,\
createDate,modifyDate,lastEditDate,lastEditType]";

/// Service representing a single ticket update.
pub const TICKET_UPDATE_SERVICE: &str = "SoftLayer_Ticket_Update";

/// Status names SoftLayer uses for tickets that still need attention.
const OPEN_STATUSES: [&str; 2] = ["Open", "Assigned"];

/// A support ticket.
#[derive(Debug)]
pub struct Ticket {
    base: ModelBase,
}

impl Ticket {
    /// Wrap an attribute mapping.
    #[must_use]
    pub fn new(client: Client, attributes: Attributes) -> Self {
        Self::from_base(ModelBase::new(names::TICKET, client, attributes))
    }

    pub(crate) const fn from_base(base: ModelBase) -> Self {
        Self { base }
    }

    /// Fetch a ticket by id.
    ///
    /// # Errors
    ///
    /// Propagates call errors, or [`softlayer_core::Error::InvalidResponse`]
    /// if the response is not an object.
    pub async fn ticket_with_id(client: &Client, id: i64) -> Result<Self> {
        let value = client
            .service_named(names::TICKET)?
            .object_with_id(id)
            .call_with_params(
                "getObject",
                &ApiParameterFilter::new().with_object_mask(TICKET_MASK),
                vec![],
            )
            .await?;
        ModelBase::from_value(names::TICKET, client.clone(), value).map(Self::from_base)
    }

    /// Ticket title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.base.get_str("title")
    }

    /// Id of the ticket subject.
    #[must_use]
    pub fn subject_id(&self) -> Option<i64> {
        self.base.get_opt("subjectId").and_then(|v| v.as_i64())
    }

    /// Status name, e.g. `Open` or `Closed`.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.base
            .get_opt("status")
            .and_then(|status| status.get("name"))
            .and_then(|name| name.as_str())
    }

    /// Returns true while the ticket is open or assigned.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status_name()
            .is_some_and(|status| OPEN_STATUSES.contains(&status))
    }

    /// Creation time.
    #[must_use]
    pub fn create_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date("createDate")
    }

    /// Last modification time.
    #[must_use]
    pub fn modify_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date("modifyDate")
    }

    fn date(&self, key: &str) -> Option<DateTime<FixedOffset>> {
        self.base
            .get_str(key)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    /// Updates posted to this ticket, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates call errors.
    pub async fn updates(&self) -> Result<Vec<TicketUpdate>> {
        let value = self.service()?.call("getUpdates", vec![]).await?;
        models_from_list(
            TICKET_UPDATE_SERVICE,
            self.client(),
            value,
            TicketUpdate::from_base,
        )
    }
}

impl ModelObject for Ticket {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}

/// One entry in a ticket's history.
#[derive(Debug)]
pub struct TicketUpdate {
    base: ModelBase,
}

impl TicketUpdate {
    pub(crate) const fn from_base(base: ModelBase) -> Self {
        Self { base }
    }

    /// Text of the update.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.base.get_str("entry")
    }

    /// Who wrote the update (`USER`, `EMPLOYEE`, ...).
    #[must_use]
    pub fn editor_type(&self) -> Option<&str> {
        self.base.get_str("editorType")
    }
}

impl ModelObject for TicketUpdate {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;
    use softlayer_core::config::{ClientOptions, GlobalDefaults};

    fn ticket(value: serde_json::Value) -> Ticket {
        let client = Client::with_defaults(ClientOptions::new(), &GlobalDefaults::new()).unwrap();
        Ticket::new(client, value.as_object().cloned().unwrap())
    }

    #[test]
    fn status_and_dates() {
        let ticket = ticket(json!({
            "id": 12345,
            "title": "Cannot reach server",
            "subjectId": 1021,
            "status": {"id": 1001, "name": "Open"},
            "createDate": "2014-03-03T12:23:46-06:00",
            "modifyDate": "not a date"
        }));

        assert_eq!(ticket.title(), Some("Cannot reach server"));
        assert_eq!(ticket.subject_id(), Some(1021));
        assert!(ticket.is_open());

        let created = ticket.create_date().unwrap();
        assert_eq!(created.year(), 2014);
        assert_eq!(created.hour(), 12);
        assert_eq!(created.offset().local_minus_utc(), -6 * 3600);
        assert!(ticket.modify_date().is_none());
    }

    #[test]
    fn closed_ticket_is_not_open() {
        let ticket = ticket(json!({"id": 1, "status": {"name": "Closed"}}));
        assert!(!ticket.is_open());
        assert!(!self::ticket(json!({"id": 2})).is_open());
    }

    #[test]
    fn ticket_service_is_bound_to_id() {
        let ticket = ticket(json!({"id": 12346}));
        let service = ticket.service().unwrap();
        assert_eq!(service.target().service_name(), "SoftLayer_Ticket");
        assert_eq!(service.server_object_id(), Some(&json!(12346)));
    }
}
