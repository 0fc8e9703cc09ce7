//! The SoftLayer account.
//!
//! The account is the root of most relationships: its servers and its open
//! tickets are fetched through the account service bound to the account id.
//! Relationship accessors re-fetch on every call.

use crate::model::{models_from_list, Attributes, ModelBase, ModelObject};
use crate::server::{Server, ServerKind};
use crate::ticket::{Ticket, TICKET_MASK};
use crate::Result;
use softlayer_client::{Client, DefaultClient};
use softlayer_core::filter::ApiParameterFilter;
use softlayer_core::types::names;
use tracing::debug;

/// The account the client's credentials belong to.
#[derive(Debug)]
pub struct Account {
    base: ModelBase,
}

impl Account {
    /// Wrap an attribute mapping.
    #[must_use]
    pub fn new(client: Client, attributes: Attributes) -> Self {
        Self {
            base: ModelBase::new(names::ACCOUNT, client, attributes),
        }
    }

    /// Fetch the account for `client`, or for the process-wide default client.
    ///
    /// # Errors
    ///
    /// Returns [`softlayer_core::Error::NoDefaultClient`] when no client is
    /// given and no default is installed; otherwise propagates call errors.
    pub async fn account_for_client(client: Option<&Client>) -> Result<Self> {
        Self::account_with_default(client, DefaultClient::global()).await
    }

    /// Like [`Account::account_for_client`], with an explicit default holder.
    ///
    /// # Errors
    ///
    /// See [`Account::account_for_client`].
    pub async fn account_with_default(
        client: Option<&Client>,
        default: &DefaultClient,
    ) -> Result<Self> {
        let client = default.resolve(client)?;
        let value = client
            .service_named(names::ACCOUNT)?
            .call("getObject", vec![])
            .await?;

        let base = ModelBase::from_value(names::ACCOUNT, client, value)?;
        Ok(Self { base })
    }

    /// Company name.
    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        self.base.get_str("companyName")
    }

    /// First name of the account owner.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.base.get_str("firstName")
    }

    /// Last name of the account owner.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.base.get_str("lastName")
    }

    /// First address line.
    #[must_use]
    pub fn address1(&self) -> Option<&str> {
        self.base.get_str("address1")
    }

    /// Second address line.
    #[must_use]
    pub fn address2(&self) -> Option<&str> {
        self.base.get_str("address2")
    }

    /// City.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.base.get_str("city")
    }

    /// State or province.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.base.get_str("state")
    }

    /// Two-letter country code.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.base.get_str("country")
    }

    /// Postal code.
    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.base.get_str("postalCode")
    }

    /// Office phone number.
    #[must_use]
    pub fn office_phone(&self) -> Option<&str> {
        self.base.get_str("officePhone")
    }

    /// Tickets that are not yet closed.
    ///
    /// # Errors
    ///
    /// Propagates call errors.
    pub async fn open_tickets(&self) -> Result<Vec<Ticket>> {
        let filter = ApiParameterFilter::new().with_object_mask(TICKET_MASK);
        let value = self
            .service()?
            .call_with_params("getOpenTickets", &filter, vec![])
            .await?;
        models_from_list(names::TICKET, self.client(), value, Ticket::from_base)
    }

    /// Dedicated servers on the account.
    ///
    /// # Errors
    ///
    /// Propagates call errors.
    pub async fn bare_metal_servers(&self) -> Result<Vec<Server>> {
        self.servers_of_kind(ServerKind::BareMetal).await
    }

    /// Virtual servers on the account.
    ///
    /// # Errors
    ///
    /// Propagates call errors.
    pub async fn virtual_servers(&self) -> Result<Vec<Server>> {
        self.servers_of_kind(ServerKind::Virtual).await
    }

    /// Every server on the account: bare metal first, then virtual.
    ///
    /// # Errors
    ///
    /// Propagates call errors.
    pub async fn servers(&self) -> Result<Vec<Server>> {
        let mut servers = self.bare_metal_servers().await?;
        servers.extend(self.virtual_servers().await?);
        Ok(servers)
    }

    async fn servers_of_kind(&self, kind: ServerKind) -> Result<Vec<Server>> {
        let filter = ApiParameterFilter::new().with_object_mask(kind.default_mask());
        let value = self
            .service()?
            .call_with_params(kind.account_method(), &filter, vec![])
            .await?;

        let servers = models_from_list(kind.service_name(), self.client(), value, |base| {
            Server::from_base(kind, base)
        })?;
        debug!(?kind, count = servers.len(), "Fetched account servers");
        Ok(servers)
    }
}

impl ModelObject for Account {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}
