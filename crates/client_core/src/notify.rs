//! User-facing feedback: transient notices and clipboard access.

use shared::domain::ViewerRole;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Routes notices into the log when no UI is attached.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(text = %notice.message, "notice"),
            NoticeLevel::Error => warn!(text = %notice.message, "notice"),
        }
    }
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

pub mod messages {
    use super::ViewerRole;

    pub const STATION_REQUIRED: &str = "駅名を入力してください";
    pub const EVENT_CREATED: &str = "イベントが作成されました";
    pub const EVENT_CREATE_FAILED: &str = "イベントの作成に失敗しました";
    pub const EVENT_FETCH_FAILED: &str = "イベントの取得に失敗しました。";
    pub const EVENT_NOT_FOUND: &str = "イベントが見つかりませんでした。";
    pub const RESPONSE_SENT: &str = "回答を送信しました！";
    pub const RESPONSE_FAILED: &str = "回答の送信に失敗しました。";
    pub const COPY_FAILED: &str = "URLのコピーに失敗しました";
    pub const NO_RECOMMENDATIONS: &str =
        "まだおすすめの店舗がありません。参加者のコメントをお待ちください！";

    pub fn link_copied(role: ViewerRole) -> String {
        format!("{}用URLをコピーしました", role.label())
    }
}
