/**
 * Chat Summary Aggregation
 *
 * Turns raw chat activity into the viewer-relative `ChatSummary` list the
 * inbox renders: the counterpart is whichever participant is not the
 * viewer, and the list is ordered by most recent activity.
 */

use std::cmp::Reverse;

use crate::backend::chat::db::ChatActivity;
use crate::shared::ChatSummary;

/// Build the viewer's summaries, newest activity first.
///
/// A chat with no messages sorts by its creation time. Ties go to the
/// higher chat id.
pub fn summarize(viewer_id: i64, activity: Vec<ChatActivity>) -> Vec<ChatSummary> {
    let mut summaries: Vec<ChatSummary> = activity
        .into_iter()
        .map(|chat| {
            let (other_user_id, other_user_name) = if chat.buyer_id == viewer_id {
                (chat.seller_id, chat.seller_name)
            } else {
                (chat.buyer_id, chat.buyer_name)
            };

            ChatSummary {
                chat_id: chat.chat_id,
                vehicle_id: chat.vehicle_id,
                vehicle_title: chat.vehicle_title,
                other_user_id,
                other_user_name,
                last_message: chat.last_message,
                last_message_at: chat.last_message_at.unwrap_or(chat.created_at),
                unread_count: chat.unread_count,
            }
        })
        .collect();

    summaries.sort_by_key(|s| (Reverse(s.last_message_at), Reverse(s.chat_id)));
    summaries
}

/// Sum of unread counts across summaries
pub fn total_unread(summaries: &[ChatSummary]) -> i64 {
    summaries.iter().map(|s| s.unread_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn activity(chat_id: i64, buyer_id: i64, seller_id: i64, minutes: Option<i64>) -> ChatActivity {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ChatActivity {
            chat_id,
            vehicle_id: 100 + chat_id,
            vehicle_title: format!("Vehicle {}", chat_id),
            buyer_id,
            buyer_name: format!("buyer{}", buyer_id),
            seller_id,
            seller_name: format!("seller{}", seller_id),
            created_at: base,
            last_message: minutes.map(|m| format!("message at {}", m)),
            last_message_at: minutes.map(|m| base + Duration::minutes(m)),
            unread_count: chat_id,
        }
    }

    #[test]
    fn test_counterpart_depends_on_viewer() {
        let as_buyer = summarize(1, vec![activity(1, 1, 2, Some(5))]);
        assert_eq!(as_buyer[0].other_user_id, 2);
        assert_eq!(as_buyer[0].other_user_name, "seller2");

        let as_seller = summarize(2, vec![activity(1, 1, 2, Some(5))]);
        assert_eq!(as_seller[0].other_user_id, 1);
        assert_eq!(as_seller[0].other_user_name, "buyer1");
    }

    #[test]
    fn test_ordered_by_last_activity() {
        let summaries = summarize(
            1,
            vec![
                activity(1, 1, 2, Some(5)),
                activity(2, 1, 3, Some(30)),
                activity(3, 1, 4, None),
                activity(4, 1, 5, Some(5)),
            ],
        );

        let order: Vec<i64> = summaries.iter().map(|s| s.chat_id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
        assert_eq!(summaries[3].last_message, None);
    }

    #[test]
    fn test_total_unread() {
        let summaries = summarize(1, vec![activity(1, 1, 2, None), activity(3, 1, 2, None)]);
        assert_eq!(total_unread(&summaries), 4);
        assert_eq!(total_unread(&[]), 0);
    }
}
