use crate::{
    dto::account::{AddressInput, GstClaimRequest, GstSettings, ProfileUpdate},
    error::{ApiResult, MutationResult},
    gateway::ApiGateway,
    models::{Address, Profile, Wallet},
    services::{into_ack, into_mutation},
};

/// Thin pass-through over the account endpoints. Reads surface `ApiResult`,
/// mutations the standardized `MutationResult`.
pub struct AccountViewModel {
    gateway: ApiGateway,
}

impl AccountViewModel {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> ApiResult<Option<Profile>> {
        Ok(self.gateway.get::<Profile>("users/profile").await?.data)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> MutationResult<Profile> {
        into_mutation(self.gateway.put::<_, Profile>("users/profile", update).await)
    }

    pub async fn addresses(&self) -> ApiResult<Vec<Address>> {
        Ok(self
            .gateway
            .get::<Vec<Address>>("users/addresses")
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn add_address(&self, address: &AddressInput) -> MutationResult<Address> {
        into_mutation(
            self.gateway
                .post::<_, Address>("users/addresses", address)
                .await,
        )
    }

    pub async fn remove_address(&self, id: &str) -> MutationResult<()> {
        into_ack(self.gateway.delete(&format!("users/addresses/{id}")).await)
    }

    pub async fn wishlist(&self) -> ApiResult<Vec<String>> {
        Ok(self
            .gateway
            .get::<Vec<String>>("users/wishlist")
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn add_to_wishlist(&self, product_id: &str) -> MutationResult<()> {
        into_ack(
            self.gateway
                .post("users/wishlist", &serde_json::json!({ "productId": product_id }))
                .await,
        )
    }

    pub async fn remove_from_wishlist(&self, product_id: &str) -> MutationResult<()> {
        into_ack(
            self.gateway
                .delete(&format!("users/wishlist/{product_id}"))
                .await,
        )
    }

    pub async fn wallet(&self) -> ApiResult<Option<Wallet>> {
        Ok(self.gateway.get::<Wallet>("users/wallet").await?.data)
    }

    pub async fn gst_settings(&self) -> ApiResult<Option<GstSettings>> {
        Ok(self.gateway.get::<GstSettings>("gst/settings").await?.data)
    }

    pub async fn set_gst_claim(&self, claim: &GstClaimRequest) -> MutationResult<GstSettings> {
        into_mutation(self.gateway.put::<_, GstSettings>("gst/claim/user", claim).await)
    }
}
