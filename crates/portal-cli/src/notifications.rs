//! Notification mailbox command handlers.

use crate::app::App;
use anyhow::bail;
use portal_gateway::GatewayClient;
use portal_notify::{Navigator, NotificationCenter};
use std::sync::Arc;

/// Records navigation requests on stdout instead of routing anywhere;
/// the CLI has no page to move.
struct PrintingNavigator {
    current_path: String,
}

impl Navigator for PrintingNavigator {
    fn current_path(&self) -> String {
        self.current_path.clone()
    }

    fn navigate(&self, path: &str) {
        println!("Navigate to: {path}");
    }
}

async fn open_mailbox(
    app: &App,
    current_path: String,
) -> anyhow::Result<NotificationCenter<GatewayClient, PrintingNavigator>> {
    app.manager.bootstrap().await?;

    let Some(role) = app.manager.current_role() else {
        bail!("Not logged in; run `hemolink login` first");
    };

    let manager = Arc::clone(&app.manager);
    let center = NotificationCenter::new(
        role,
        app.gateway.clone(),
        PrintingNavigator { current_path },
        Box::new(move || manager.access_token().ok().flatten()),
    );
    center.open().await?;
    Ok(center)
}

/// Handle `hemolink notifications list`.
pub async fn list(app: &App, page: usize) -> anyhow::Result<()> {
    let center = open_mailbox(app, "/".to_string()).await?;
    center.set_page(page);

    let items = center.page_items();
    if items.is_empty() {
        println!("No notifications on page {page}.");
    }
    for item in &items {
        let marker = if item.is_read { " " } else { "*" };
        let redirect = item
            .redirect
            .as_deref()
            .map(|path| format!(" -> {path}"))
            .unwrap_or_default();
        println!(
            "{marker} [{}] {} ({}){redirect}",
            item.id,
            item.description,
            item.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!(
        "Page {}/{} - {} notification(s){}",
        center.page(),
        center.page_count(),
        center.len(),
        if center.has_unread() {
            ", unread present"
        } else {
            ""
        }
    );
    Ok(())
}

/// Handle `hemolink notifications read`.
pub async fn read(
    app: &App,
    id: i64,
    redirect: Option<String>,
    current_path: String,
) -> anyhow::Result<()> {
    let center = open_mailbox(app, current_path).await?;
    center.mark_read(id, redirect.as_deref()).await?;
    println!("Notification {id} marked read.");
    Ok(())
}
