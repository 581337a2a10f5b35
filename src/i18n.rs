//! Localized user-facing messages
//!
//! The catalog is built once at startup and handed to the HTTP layer through
//! application state; nothing here is global.

use std::collections::HashMap;
use crate::domain::evaluator::CouponError;

/// Supported response languages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    /// Parses a language tag such as `ar-EG`; unknown languages yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Lang::En),
            "ar" => Some(Lang::Ar),
            _ => None,
        }
    }

    /// Picks the most preferred supported language of an `Accept-Language`
    /// header value. Tags are ranked by `q` (default 1), ties keep header order.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut ranked: Vec<(f32, &str)> = header
            .split(',')
            .filter_map(|item| {
                let mut parts = item.split(';');
                let tag = parts.next()?.trim();
                let q = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!tag.is_empty() && q > 0.0).then_some((q, tag))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().find_map(|(_, tag)| Self::from_tag(tag))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NoItems,
    InvalidProductCoupon,
    InvalidCoupon,
    ExpiredCoupon,
    MinimumCoupon,
    AlreadyApplied,
    RemoveFailed,
    WishlistDuplicate,
    WishlistMissingProduct,
}

/// Message lookup seam, so deployments can plug in their own translations.
pub trait Localizer: Send + Sync {
    fn message(&self, key: MessageKey, lang: Lang) -> String;

    /// Localized text for a coupon rejection. A missing coupon shares the
    /// "invalid coupon" wording; the minimum error is suffixed with the amount.
    fn coupon_error(&self, error: &CouponError, lang: Lang) -> String {
        match error {
            CouponError::NoItems => self.message(MessageKey::NoItems, lang),
            CouponError::InvalidProductCoupon => self.message(MessageKey::InvalidProductCoupon, lang),
            CouponError::InvalidCoupon | CouponError::CouponNotFound => self.message(MessageKey::InvalidCoupon, lang),
            CouponError::ExpiredCoupon => self.message(MessageKey::ExpiredCoupon, lang),
            CouponError::MinimumNotMet { minimum } => format!("{}{}", self.message(MessageKey::MinimumCoupon, lang), minimum),
            CouponError::AlreadyApplied => self.message(MessageKey::AlreadyApplied, lang),
        }
    }
}

/// Static message table with English fallback
#[derive(Clone, Debug)]
pub struct MessageCatalog {
    messages: HashMap<(MessageKey, Lang), String>,
}

impl MessageCatalog {
    pub fn empty() -> Self { Self { messages: HashMap::new() } }

    pub fn insert(&mut self, key: MessageKey, lang: Lang, text: impl Into<String>) -> &mut Self {
        self.messages.insert((key, lang), text.into());
        self
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        use MessageKey::*;
        let mut catalog = Self::empty();
        catalog
            .insert(NoItems, Lang::En, "Your cart has no items")
            .insert(NoItems, Lang::Ar, "لا توجد منتجات في سلة التسوق")
            .insert(InvalidProductCoupon, Lang::En, "This coupon is not valid for the products in your cart")
            .insert(InvalidProductCoupon, Lang::Ar, "هذا الكوبون غير صالح للمنتجات الموجودة في سلتك")
            .insert(InvalidCoupon, Lang::En, "Invalid coupon")
            .insert(InvalidCoupon, Lang::Ar, "كوبون غير صالح")
            .insert(ExpiredCoupon, Lang::En, "This coupon has expired")
            .insert(ExpiredCoupon, Lang::Ar, "انتهت صلاحية هذا الكوبون")
            .insert(MinimumCoupon, Lang::En, "The minimum cart value to apply this coupon is ")
            .insert(MinimumCoupon, Lang::Ar, "الحد الأدنى لقيمة السلة لتطبيق هذا الكوبون هو ")
            .insert(AlreadyApplied, Lang::En, "A coupon is already applied to your cart")
            .insert(AlreadyApplied, Lang::Ar, "تم تطبيق كوبون على سلتك بالفعل")
            .insert(RemoveFailed, Lang::En, "Something has occurred")
            .insert(RemoveFailed, Lang::Ar, "حدث خطأ ما")
            .insert(WishlistDuplicate, Lang::En, "Product is already in your wishlist")
            .insert(WishlistDuplicate, Lang::Ar, "المنتج موجود بالفعل في قائمة أمنياتك")
            .insert(WishlistMissingProduct, Lang::En, "Product does not exist")
            .insert(WishlistMissingProduct, Lang::Ar, "المنتج غير موجود");
        catalog
    }
}

impl Localizer for MessageCatalog {
    fn message(&self, key: MessageKey, lang: Lang) -> String {
        self.messages
            .get(&(key, lang))
            .or_else(|| self.messages.get(&(key, Lang::En)))
            .cloned()
            .unwrap_or_else(|| format!("{:?}", key))
    }
}
