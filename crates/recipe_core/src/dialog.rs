use std::collections::VecDeque;

/// A user-facing message waiting to be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub id: u64,
    pub title: String,
    pub message: String,
}

/// First-in first-out queue of dialogs; only the head is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogQueue {
    next_id: u64,
    queue: VecDeque<Dialog>,
}

impl DialogQueue {
    /// Appends a dialog unless an identical one is already waiting. Returns
    /// whether the queue changed.
    pub fn push(&mut self, title: impl Into<String>, message: impl Into<String>) -> bool {
        let title = title.into();
        let message = message.into();
        let duplicate = self
            .queue
            .iter()
            .any(|dialog| dialog.title == title && dialog.message == message);
        if duplicate {
            return false;
        }
        self.next_id += 1;
        self.queue.push_back(Dialog {
            id: self.next_id,
            title,
            message,
        });
        true
    }

    /// Removes the dialog currently shown.
    pub fn dismiss(&mut self) -> Option<Dialog> {
        self.queue.pop_front()
    }

    pub fn head(&self) -> Option<&Dialog> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogs_are_shown_in_arrival_order() {
        let mut queue = DialogQueue::default();
        assert!(queue.push("Error", "first"));
        assert!(queue.push("Error", "second"));

        assert_eq!(queue.head().map(|d| d.message.as_str()), Some("first"));
        assert_eq!(queue.dismiss().map(|d| d.id), Some(1));
        assert_eq!(queue.head().map(|d| d.message.as_str()), Some("second"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn identical_waiting_dialog_is_not_repeated() {
        let mut queue = DialogQueue::default();
        assert!(queue.push("Error", "network error"));
        assert!(!queue.push("Error", "network error"));
        assert_eq!(queue.len(), 1);

        queue.dismiss();
        assert!(queue.is_empty());
        assert!(queue.push("Error", "network error"));
        assert_eq!(queue.head().map(|d| d.id), Some(2));
    }
}
