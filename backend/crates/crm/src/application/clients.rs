//! Client Service

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;

use crate::application::cache::{CrmCaches, clients_key};
use crate::domain::entity::client::{Client, ClientFields};
use crate::domain::repository::ClientRepository;
use crate::domain::value_object::ids::ClientId;
use crate::error::{CrmError, CrmResult};

pub struct ClientService<R>
where
    R: ClientRepository,
{
    repo: Arc<R>,
    caches: CrmCaches,
}

impl<R> ClientService<R>
where
    R: ClientRepository,
{
    pub fn new(repo: Arc<R>, caches: CrmCaches) -> Self {
        Self { repo, caches }
    }

    pub async fn create(&self, owner: &UserId, fields: ClientFields) -> CrmResult<Client> {
        let client = Client::new(*owner, fields.validate()?);
        self.repo.create_client(&client).await?;

        self.caches.clients.invalidate_prefix(&clients_key(owner));
        tracing::info!(user_id = %owner, client_id = %client.client_id, "Client created");

        Ok(client)
    }

    pub async fn get(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Client> {
        self.repo
            .find_client(owner, client_id)
            .await?
            .ok_or(CrmError::ClientNotFound)
    }

    pub async fn list(&self, owner: &UserId) -> CrmResult<Vec<Client>> {
        let key = clients_key(owner);
        if let Some(clients) = self.caches.clients.get(&key) {
            return Ok(clients);
        }

        // A mutation committing during the read bumps the generation
        let generation = self.caches.clients.generation();
        let clients = self.repo.list_clients(owner).await?;
        self.caches
            .clients
            .set_if_fresh(&key, clients.clone(), generation);
        Ok(clients)
    }

    pub async fn update(
        &self,
        owner: &UserId,
        client_id: &ClientId,
        fields: ClientFields,
    ) -> CrmResult<Client> {
        let fields = fields.validate()?;
        let mut client = self.get(owner, client_id).await?;
        client.apply(fields);

        if !self.repo.update_client(&client).await? {
            return Err(CrmError::ClientNotFound);
        }

        self.caches.clients.invalidate_prefix(&clients_key(owner));
        tracing::info!(user_id = %owner, client_id = %client_id, "Client updated");

        Ok(client)
    }

    /// Deletes the client together with its orders and their payments
    pub async fn delete(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<()> {
        if !self.repo.delete_client_cascade(owner, client_id).await? {
            return Err(CrmError::ClientNotFound);
        }

        self.caches.invalidate_owner(owner);
        tracing::info!(user_id = %owner, client_id = %client_id, "Client deleted");

        Ok(())
    }
}
