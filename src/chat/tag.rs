use irc::proto::message::Tag;
use std::collections::HashMap;

type TagMap = HashMap<String, Option<String>>;

pub trait Tags
where
    Self: Sized,
{
    fn from_tags(tags: TagMap) -> Option<(Self, TagMap)>;
}

#[derive(Debug, PartialEq, Eq)]
pub struct PRIVMSGTags {
    pub id: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub badges: HashMap<String, String>,
    pub bits: Option<u64>,
    /// original tag: mod
    pub is_mod: bool,
    pub subscriber: bool,
    pub vip: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct USERNOTICETags {
    pub message_info: PRIVMSGTags,
    pub msg_id: String,
    pub login: String,
    pub sub: Option<NoticeSubTags>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NoticeSubTags {
    /// original tags: msg-param-cumulative-months or msg-param-months
    pub months: u64,
    /// original tag: msg-param-recipient-display-name
    pub gift_target: Option<String>,
}

pub fn tags<T: Tags>(raw_tags: &[Tag]) -> Option<T> {
    let tags_map = raw_tags
        .iter()
        .map(|Tag(k, v)| (k.clone(), v.clone()))
        .collect();
    T::from_tags(tags_map).map(|(tags, _)| tags)
}

/// Removes a tag, treating a tag without a value like an absent one.
fn take(tags: &mut TagMap, key: &str) -> Option<String> {
    tags.remove(key).flatten().filter(|value| !value.is_empty())
}

fn take_number(tags: &mut TagMap, key: &str) -> Option<u64> {
    take(tags, key).and_then(|value| value.parse().ok())
}

fn parse_badges(badges: &str) -> HashMap<String, String> {
    badges
        .split(',')
        .filter_map(|badge| badge.split_once('/'))
        .map(|(k, v)| (String::from(k), String::from(v)))
        .collect()
}

impl Tags for PRIVMSGTags {
    fn from_tags(mut tags: TagMap) -> Option<(Self, TagMap)> {
        let (Some(id), Some(user_id)) = (take(&mut tags, "id"), take(&mut tags, "user-id")) else {
            return None;
        };
        let badges = take(&mut tags, "badges")
            .map(|badges| parse_badges(&badges))
            .unwrap_or_default();
        let vip = tags.remove("vip").is_some() || badges.contains_key("vip");
        Some((
            Self {
                id,
                user_id,
                display_name: take(&mut tags, "display-name"),
                bits: take_number(&mut tags, "bits"),
                is_mod: take(&mut tags, "mod").as_deref() == Some("1"),
                subscriber: take(&mut tags, "subscriber").as_deref() == Some("1"),
                vip,
                badges,
            },
            tags,
        ))
    }
}

impl Tags for USERNOTICETags {
    fn from_tags(tags: TagMap) -> Option<(Self, TagMap)> {
        let (message_info, mut tags) = PRIVMSGTags::from_tags(tags)?;
        let msg_id = take(&mut tags, "msg-id")?;
        let login = take(&mut tags, "login")?;

        let sub = {
            let (sub_months, gift_months, gift_target) = (
                take_number(&mut tags, "msg-param-cumulative-months"),
                take_number(&mut tags, "msg-param-months"),
                take(&mut tags, "msg-param-recipient-display-name"),
            );
            if let (Some(gift_months), Some(gift_target)) = (gift_months, gift_target) {
                Some(NoticeSubTags {
                    months: gift_months,
                    gift_target: Some(gift_target),
                })
            } else {
                sub_months.map(|months| NoticeSubTags {
                    months,
                    gift_target: None,
                })
            }
        };
        Some((
            Self {
                message_info,
                msg_id,
                login,
                sub,
            },
            tags,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> Vec<Tag> {
        pairs
            .iter()
            .map(|(k, v)| Tag(String::from(*k), Some(String::from(*v))))
            .collect()
    }

    #[test]
    fn privmsg_tags() {
        let tags = tags::<PRIVMSGTags>(&raw(&[
            ("id", "b34ccfc7-4977-403a-8a94-33c6bac34fb8"),
            ("user-id", "713936733"),
            ("display-name", "Ronni"),
            ("badges", "broadcaster/1,subscriber/12"),
            ("mod", "0"),
            ("subscriber", "1"),
            ("bits", "100"),
        ]))
        .unwrap();
        assert_eq!(tags.user_id, "713936733");
        assert_eq!(tags.display_name.as_deref(), Some("Ronni"));
        assert_eq!(tags.bits, Some(100));
        assert!(tags.subscriber);
        assert!(!tags.is_mod);
        assert_eq!(tags.badges.get("broadcaster").map(String::as_str), Some("1"));
        assert!(!tags.vip);
    }

    #[test]
    fn empty_badges_and_missing_flags() {
        let tags = tags::<PRIVMSGTags>(&raw(&[
            ("id", "1"),
            ("user-id", "2"),
            ("badges", ""),
            ("vip", "1"),
        ]))
        .unwrap();
        assert!(tags.badges.is_empty());
        assert!(tags.vip);
        assert!(!tags.subscriber);
        assert_eq!(tags.display_name, None);
    }

    #[test]
    fn malformed_tags_are_skipped() {
        assert_eq!(tags::<PRIVMSGTags>(&raw(&[("id", "1")])), None);
        let tags = tags::<PRIVMSGTags>(&raw(&[
            ("id", "1"),
            ("user-id", "2"),
            ("bits", "lots"),
            ("badges", "nonsense"),
        ]))
        .unwrap();
        assert_eq!(tags.bits, None);
        assert!(tags.badges.is_empty());
    }

    #[test]
    fn resub_notice() {
        let tags = tags::<USERNOTICETags>(&raw(&[
            ("id", "1"),
            ("user-id", "2"),
            ("login", "ronni"),
            ("msg-id", "resub"),
            ("msg-param-cumulative-months", "6"),
        ]))
        .unwrap();
        assert_eq!(tags.msg_id, "resub");
        assert_eq!(
            tags.sub,
            Some(NoticeSubTags {
                months: 6,
                gift_target: None
            })
        );
    }

    #[test]
    fn gift_notice() {
        let tags = tags::<USERNOTICETags>(&raw(&[
            ("id", "1"),
            ("user-id", "2"),
            ("login", "tww2"),
            ("msg-id", "subgift"),
            ("msg-param-months", "1"),
            ("msg-param-recipient-display-name", "Mr_Woodchuck"),
        ]))
        .unwrap();
        assert_eq!(
            tags.sub,
            Some(NoticeSubTags {
                months: 1,
                gift_target: Some(String::from("Mr_Woodchuck"))
            })
        );
    }

    #[test]
    fn notice_requires_msg_id() {
        assert_eq!(
            tags::<USERNOTICETags>(&raw(&[("id", "1"), ("user-id", "2"), ("login", "x")])),
            None
        );
    }
}
