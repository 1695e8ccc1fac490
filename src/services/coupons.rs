use chrono::{DateTime, Utc};

use crate::{
    dto::coupons::CouponInput,
    error::{ApiResult, MutationResult},
    gateway::ApiGateway,
    models::Coupon,
    services::{into_ack, into_mutation},
};

/// Derived coupon state. Never stored; expiry is checked before anything
/// else, so an expired coupon reports `Expired` even when `is_active` is
/// still set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponState {
    Active,
    Inactive,
    Expired,
    Exhausted,
}

pub fn coupon_state(coupon: &Coupon, now: DateTime<Utc>) -> CouponState {
    if coupon.expiry_date < now {
        return CouponState::Expired;
    }
    if coupon.used_count >= coupon.max_uses {
        return CouponState::Exhausted;
    }
    if !coupon.is_active {
        return CouponState::Inactive;
    }
    CouponState::Active
}

pub struct CouponService {
    gateway: ApiGateway,
}

impl CouponService {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<Coupon>> {
        Ok(self
            .gateway
            .get::<Vec<Coupon>>("coupons")
            .await?
            .data
            .unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> ApiResult<Option<Coupon>> {
        Ok(self
            .gateway
            .get::<Coupon>(&format!("coupons/{id}"))
            .await?
            .data)
    }

    pub async fn create(&self, input: &CouponInput) -> MutationResult<Coupon> {
        into_mutation(self.gateway.post::<_, Coupon>("coupons", input).await)
    }

    pub async fn update(&self, id: &str, input: &CouponInput) -> MutationResult<Coupon> {
        into_mutation(
            self.gateway
                .put::<_, Coupon>(&format!("coupons/{id}"), input)
                .await,
        )
    }

    pub async fn delete(&self, id: &str) -> MutationResult<()> {
        into_ack(self.gateway.delete(&format!("coupons/{id}")).await)
    }
}
