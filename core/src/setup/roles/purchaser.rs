//! Purchaser, installed with the `ecommerce` feature

use crate::acl::{AclRegistry, ResourcePermission, RoleAcl};
use crate::error::Result;
use crate::setup::{FEATURE_ECOMMERCE, SetupContext};

pub const ROLE: &str = "Purchaser";

pub fn setup(registry: &mut dyn AclRegistry, ctx: &SetupContext) -> Result<()> {
    if !ctx.features.contains(FEATURE_ECOMMERCE) {
        return Ok(());
    }

    registry.register_role(
        RoleAcl::new(ROLE)
            .method("general.actor_is_authenticated")
            .method("ownership.actor_owns_purchase_order")
            .resource("ClaimVoucher", ResourcePermission::new().read(["code", "product"]))
            .resource("Product", ResourcePermission::new().read(["description", "name", "price", "sku"]))
            .resource(
                "PurchaseOrder",
                ResourcePermission::new()
                    .create()
                    .read(["is_paid", "product_claims", "products", "user"])
                    .update(["product_claims", "products"]),
            )
            .arbitrary_perm("redeem_claim_vouchers"),
    )
}
