//! Macros for declaring caller states.

/// Declare consecutive user-state constants starting at
/// [`StateId::USER_START`](crate::StateId::USER_START).
///
/// # Example
///
/// ```
/// use tablefsm::{states, StateId};
///
/// states! {
///     pub OPEN_FILE,
///     READ_LINE,
///     CLOSE_FILE,
/// }
///
/// assert_eq!(OPEN_FILE, StateId::USER_START);
/// assert_eq!(READ_LINE, StateId::user(1));
/// assert_eq!(CLOSE_FILE, StateId::user(2));
/// ```
#[macro_export]
macro_rules! states {
    (@next $n:expr; $vis:vis) => {};

    (@next $n:expr; $vis:vis $name:ident $(, $rest:ident)*) => {
        $vis const $name: $crate::StateId = $crate::StateId::user($n);
        $crate::states!(@next $n + 1; $vis $($rest),*);
    };

    ($vis:vis $($name:ident),+ $(,)?) => {
        $crate::states!(@next 0; $vis $($name),+);
    };
}

#[cfg(test)]
mod tests {
    use crate::StateId;

    states! {
        FIRST,
        SECOND,
        THIRD
    }

    mod exported {
        states! { pub ONLY }
    }

    #[test]
    fn states_count_from_user_start() {
        assert_eq!(FIRST, StateId::USER_START);
        assert_eq!(SECOND, StateId::user(1));
        assert_eq!(THIRD, StateId::user(2));
    }

    #[test]
    fn visibility_is_forwarded() {
        assert_eq!(exported::ONLY, StateId::USER_START);
    }

    #[test]
    fn declared_states_are_not_reserved() {
        assert!(!FIRST.is_reserved());
        assert!(!THIRD.is_reserved());
    }
}
