use crate::deals::Deal;

pub const POST_FOOTER_LINE: &str = "📦 Für Baby & Kinderartikel";

/// Render the ready-to-post message for a single deal.
///
/// Deterministic and side-effect free. Missing `discount` or `old_price`
/// select the shorter line variant; every field is trimmed before
/// interpolation.
pub fn build_post(deal: &Deal) -> String {
    let title = deal.title.trim();
    let price = deal.price.trim();
    let old_price = deal.old_price.trim();
    let discount = deal.discount.trim();
    let link = deal.link.trim();

    let mut lines = Vec::new();
    lines.push("👶 Baby-Deal".to_string());

    if discount.is_empty() {
        lines.push(format!("🔥 {}", title));
    } else {
        lines.push(format!("🔥 {} auf {}", discount, title));
    }

    if old_price.is_empty() {
        lines.push(format!("💰 Jetzt {}", price));
    } else {
        lines.push(format!("💰 Jetzt {} (statt {})", price, old_price));
    }

    lines.push(String::new());
    lines.push(format!("👉 {}", link));
    lines.push(String::new());
    lines.push(POST_FOOTER_LINE.to_string());

    lines.join("\n")
}
