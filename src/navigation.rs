//! Screen navigation state machine.
//!
//! ```text
//!   Login --OpenRegister--> Register --Registered/Back--> Login
//!   Login --LoginSucceeded--> BookList --OpenBook--> Detail
//!   BookList --Logout--> Login          Detail --Back--> BookList
//! ```
//!
//! Guards (valid credentials, free username, existing book) are checked by
//! the caller before an event is applied.

use crate::error::NavError;

/// The screens of the application. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Login,
    Register,
    BookList,
    Detail,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::Register => "register",
            Screen::BookList => "books",
            Screen::Detail => "detail",
        }
    }
}

/// Presentation hint for a transition; has no effect on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    LoginSucceeded,
    OpenRegister,
    Registered,
    Back,
    OpenBook,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    pub direction: Direction,
}

/// Target screen and direction for `event` fired on `from`, if allowed.
fn target(from: Screen, event: NavEvent) -> Option<(Screen, Direction)> {
    let step = match (from, event) {
        (Screen::Login, NavEvent::LoginSucceeded) => (Screen::BookList, Direction::Forward),
        (Screen::Login, NavEvent::OpenRegister) => (Screen::Register, Direction::Forward),
        (Screen::Register, NavEvent::Registered) => (Screen::Login, Direction::Back),
        (Screen::Register, NavEvent::Back) => (Screen::Login, Direction::Back),
        (Screen::BookList, NavEvent::OpenBook) => (Screen::Detail, Direction::Forward),
        (Screen::BookList, NavEvent::Logout) => (Screen::Login, Direction::Back),
        (Screen::Detail, NavEvent::Back) => (Screen::BookList, Direction::Back),
        _ => return None,
    };
    Some(step)
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
    last_direction: Option<Direction>,
}

impl Navigator {
    /// Start on [`Screen::Login`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Direction of the most recent transition, `None` before the first one.
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Compute the transition `event` would cause without applying it.
    pub fn check(&self, event: NavEvent) -> Result<Transition, NavError> {
        let (to, direction) = target(self.current, event).ok_or(NavError::InvalidTransition {
            from: self.current,
            event,
        })?;
        Ok(Transition {
            from: self.current,
            to,
            direction,
        })
    }

    /// Apply `event`. On error the current screen is unchanged.
    pub fn apply(&mut self, event: NavEvent) -> Result<Transition, NavError> {
        let transition = self.check(event)?;
        self.current = transition.to;
        self.last_direction = Some(transition.direction);
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCREENS: [Screen; 4] = [Screen::Login, Screen::Register, Screen::BookList, Screen::Detail];
    const ALL_EVENTS: [NavEvent; 6] = [
        NavEvent::LoginSucceeded,
        NavEvent::OpenRegister,
        NavEvent::Registered,
        NavEvent::Back,
        NavEvent::OpenBook,
        NavEvent::Logout,
    ];

    #[test]
    fn starts_on_login() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.last_direction(), None);
    }

    #[test]
    fn full_session_walk() {
        let mut nav = Navigator::new();
        let steps = [
            (NavEvent::OpenRegister, Screen::Register, Direction::Forward),
            (NavEvent::Back, Screen::Login, Direction::Back),
            (NavEvent::OpenRegister, Screen::Register, Direction::Forward),
            (NavEvent::Registered, Screen::Login, Direction::Back),
            (NavEvent::LoginSucceeded, Screen::BookList, Direction::Forward),
            (NavEvent::OpenBook, Screen::Detail, Direction::Forward),
            (NavEvent::Back, Screen::BookList, Direction::Back),
            (NavEvent::Logout, Screen::Login, Direction::Back),
        ];
        for (event, to, direction) in steps {
            let from = nav.current();
            let t = nav.apply(event).unwrap();
            assert_eq!(t, Transition { from, to, direction });
            assert_eq!(nav.current(), to);
            assert_eq!(nav.last_direction(), Some(direction));
        }
    }

    #[test]
    fn invalid_events_leave_state_alone() {
        let mut nav = Navigator::new();
        let err = nav.apply(NavEvent::OpenBook).unwrap_err();
        assert_eq!(
            err,
            NavError::InvalidTransition {
                from: Screen::Login,
                event: NavEvent::OpenBook
            }
        );
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.last_direction(), None);
        assert_eq!(err.to_string(), "Cannot apply OpenBook while on the login screen");
    }

    #[test]
    fn exactly_seven_transitions_exist() {
        let valid = ALL_SCREENS
            .iter()
            .flat_map(|s| ALL_EVENTS.iter().map(move |e| (*s, *e)))
            .filter(|(s, e)| target(*s, *e).is_some())
            .count();
        assert_eq!(valid, 7);
    }

    #[test]
    fn check_does_not_move() {
        let nav = Navigator::new();
        assert_eq!(nav.check(NavEvent::LoginSucceeded).unwrap().to, Screen::BookList);
        assert_eq!(nav.current(), Screen::Login);
    }
}
