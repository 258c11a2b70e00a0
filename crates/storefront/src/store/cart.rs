//! Cart slice.

use wardrobe_core::{Cart, CartError, CartItem, CartLine, ProductId};

/// Cart slice actions.
#[derive(Debug, Clone)]
pub enum CartAction {
    AddToCart(CartItem),
    /// Add several units at once (detail page quantity picker).
    AddManyToCart { item: CartItem, quantity: u32 },
    /// Remove one unit, deleting the line at zero.
    RemoveFromCart(ProductId),
    /// Delete the whole line.
    RemoveItemCompletely(ProductId),
    ClearCart,
    /// Take the units of a placed order out of the cart.
    RemoveOrdered(Vec<CartLine>),
}

impl CartAction {
    /// Whether this action can change the cart contents.
    #[must_use]
    pub const fn mutates(&self) -> bool {
        !matches!(self, Self::AddManyToCart { quantity: 0, .. })
    }
}

/// Apply `action` to `cart`.
///
/// Rejected actions leave the cart untouched.
pub(crate) fn reduce(cart: &mut Cart, action: CartAction) -> Result<(), CartError> {
    match action {
        CartAction::AddToCart(item) => cart.add(item)?,
        CartAction::AddManyToCart { item, quantity } => cart.add_many(item, quantity)?,
        CartAction::RemoveFromCart(id) => cart.remove_one(id)?,
        CartAction::RemoveItemCompletely(id) => {
            cart.remove_line(id)?;
        }
        CartAction::ClearCart => cart.clear(),
        CartAction::RemoveOrdered(lines) => cart.remove_ordered(&lines),
    }
    Ok(())
}
