//! Like toggling and comment appending.

/// Remove `user` from `likes` when present, append it otherwise.
///
/// Applying the toggle twice with the same user restores the original sequence.
pub fn toggle_like(likes: &[String], user: &str) -> Vec<String> {
    if likes.iter().any(|id| id == user) {
        likes.iter().filter(|id| *id != user).cloned().collect()
    } else {
        let mut next = Vec::with_capacity(likes.len() + 1);
        next.extend_from_slice(likes);
        next.push(user.to_string());
        next
    }
}

/// Append `value` to the end of `comments`.
pub fn append_comment(comments: &[String], value: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(comments.len() + 1);
    next.extend_from_slice(comments);
    next.push(value.to_string());
    next
}

pub fn has_liked(likes: &[String], user: &str) -> bool {
    likes.iter().any(|id| id == user)
}
