use super::*;

#[test]
fn bearer_prefixes_the_token() {
    assert_eq!(bearer("tok-123"), "Bearer tok-123");
}

#[test]
fn history_failed_message_formats_status() {
    assert_eq!(history_failed_message(401), "history request failed: 401");
}

#[test]
fn edit_failed_message_formats_status() {
    assert_eq!(edit_failed_message(403), "edit failed: 403");
}

#[test]
fn delete_failed_message_formats_status() {
    assert_eq!(delete_failed_message(404), "delete failed: 404");
}
