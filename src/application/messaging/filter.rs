//! Nonsense filter - recognises messages the bot must ignore

use std::sync::Arc;

use super::trigger::TriggerConfig;
use crate::domain::entities::{BotVariant, IncomingMessage};

/// Reserved system account, never answered
pub const SYSTEM_ACCOUNT: &str = "微信团队";

/// Transport placeholders for content the bot cannot read
const SYSTEM_NOTICES: &[&str] = &[
    // video / voice call
    "收到一条视频/语音聊天消息，请在手机上查看",
    // red packet
    "收到红包，请在手机上查看",
    // transfer
    "收到转账，请在手机上查看",
    // location
    "/cgi-bin/mmwebwx-bin/webwxgetpubliclinkimg",
    // greeting digest
    "以上是打招呼的内容",
];

/// Sent when a contact accepts the bot as a friend. Only the default variant skips it.
pub const FRIEND_ACCEPTED_NOTICE: &str = "刚刚把你添加到通讯录";

pub struct NonsenseFilter {
    config: Arc<TriggerConfig>,
}

impl NonsenseFilter {
    pub fn new(config: Arc<TriggerConfig>) -> Self {
        Self { config }
    }

    pub fn is_nonsense(&self, message: &IncomingMessage, variant: BotVariant) -> bool {
        let text = message.text.as_str();
        message.sender_is_self
            || !message.kind.is_routable()
            || message.sender.name == SYSTEM_ACCOUNT
            || SYSTEM_NOTICES.iter().any(|notice| text.contains(notice))
            || (variant == BotVariant::Default && text.contains(FRIEND_ACCEPTED_NOTICE))
            || self.is_blocked(text)
    }

    /// Whether the text contains a configured input block word
    fn is_blocked(&self, text: &str) -> bool {
        self.config.block_words.iter().any(|word| text.contains(word.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Contact, MessageKind};

    fn filter() -> NonsenseFilter {
        NonsenseFilter::new(Arc::new(TriggerConfig {
            block_words: vec!["spam".to_string()],
            ..Default::default()
        }))
    }

    fn text(t: &str) -> IncomingMessage {
        IncomingMessage::from_text(Contact::named("alice"), t)
    }

    #[test]
    fn test_plain_text_and_audio_pass() {
        let f = filter();
        assert!(!f.is_nonsense(&text("hello"), BotVariant::Default));
        assert!(!f.is_nonsense(&IncomingMessage::audio(Contact::named("alice")), BotVariant::Default));
    }

    #[test]
    fn test_self_and_system_account_ignored() {
        let f = filter();
        assert!(f.is_nonsense(&text("hello").from_self(), BotVariant::Default));
        let msg = IncomingMessage::from_text(Contact::named(SYSTEM_ACCOUNT), "hello");
        assert!(f.is_nonsense(&msg, BotVariant::CustomerService));
    }

    #[test]
    fn test_other_kinds_ignored() {
        let f = filter();
        let msg = IncomingMessage::new(Contact::named("alice"), "", MessageKind::Other("image".to_string()));
        assert!(f.is_nonsense(&msg, BotVariant::Default));
    }

    #[test]
    fn test_system_notices_ignored() {
        let f = filter();
        for notice in SYSTEM_NOTICES {
            let msg = text(&format!("[{}]", notice));
            assert!(f.is_nonsense(&msg, BotVariant::Default));
            assert!(f.is_nonsense(&msg, BotVariant::CustomerService));
        }
    }

    #[test]
    fn test_block_words() {
        let f = filter();
        assert!(f.is_nonsense(&text("buy spam now"), BotVariant::CustomerService));
        assert!(!filter_without_blocklist().is_nonsense(&text("buy spam now"), BotVariant::Default));
    }

    #[test]
    fn test_friend_accepted_notice_differs_by_variant() {
        let f = filter();
        let msg = text(&format!("bob {}，现在可以开始聊天了。", FRIEND_ACCEPTED_NOTICE));
        assert!(f.is_nonsense(&msg, BotVariant::Default));
        assert!(!f.is_nonsense(&msg, BotVariant::CustomerService));
    }

    fn filter_without_blocklist() -> NonsenseFilter {
        NonsenseFilter::new(Arc::new(TriggerConfig::default()))
    }
}
