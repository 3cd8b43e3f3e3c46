//! What the joke screen shows for a given `JokeState`.
//!
//! Loading takes precedence over a joke, which takes precedence over the
//! placeholder. The error line is independent of the three and sits next to
//! whichever one is showing, so a stale joke stays visible after a failure.

use crate::view_model::JokeState;

pub const SCREEN_TITLE: &str = "Joke Time";
pub const LOAD_ACTION_LABEL: &str = "Hit me!";
pub const PLACEHOLDER_TEXT: &str = "Tap 'Hit me!' to start laughing";
pub const LOADING_TITLE: &str = "Fetching a joke...";
pub const LOADING_SUBTITLE: &str = "This is going to be hilarious!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Loading {
        title: &'static str,
        subtitle: &'static str,
    },
    Joke {
        setup: String,
        punchline: String,
    },
    Placeholder {
        text: &'static str,
    },
}

impl Content {
    /// Headline and secondary line of the content area, in display order.
    pub fn lines(&self) -> (&str, &str) {
        match self {
            Content::Loading { title, subtitle } => (*title, *subtitle),
            Content::Joke { setup, punchline } => (setup.as_str(), punchline.as_str()),
            Content::Placeholder { text } => (*text, ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub title: &'static str,
    pub action_label: &'static str,
    pub content: Content,
    pub error_message: Option<String>,
}

impl Screen {
    pub fn from_state(state: &JokeState) -> Self {
        let content = match (&state.joke, state.is_loading) {
            (_, true) => Content::Loading {
                title: LOADING_TITLE,
                subtitle: LOADING_SUBTITLE,
            },
            (Some(joke), false) => Content::Joke {
                setup: joke.setup.clone(),
                punchline: joke.punchline.clone(),
            },
            (None, false) => Content::Placeholder {
                text: PLACEHOLDER_TEXT,
            },
        };
        Self {
            title: SCREEN_TITLE,
            action_label: LOAD_ACTION_LABEL,
            content,
            error_message: state.error_message.clone(),
        }
    }
}

impl From<&JokeState> for Screen {
    fn from(state: &JokeState) -> Self {
        Self::from_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Joke;

    fn joke() -> Joke {
        Joke {
            id: 1,
            joke_type: "general".to_string(),
            setup: "Why did the chicken cross the road?".to_string(),
            punchline: "To get to the other side.".to_string(),
        }
    }

    #[test]
    fn empty_state_shows_placeholder() {
        let screen = Screen::from_state(&JokeState::default());
        assert_eq!(
            screen.content,
            Content::Placeholder {
                text: "Tap 'Hit me!' to start laughing"
            }
        );
        assert_eq!(screen.error_message, None);
    }

    #[test]
    fn loading_hides_current_joke() {
        let state = JokeState {
            joke: Some(joke()),
            is_loading: true,
            error_message: None,
        };
        let screen = Screen::from(&state);
        assert_eq!(
            screen.content.lines(),
            ("Fetching a joke...", "This is going to be hilarious!")
        );
    }

    #[test]
    fn stale_joke_is_shown_with_error() {
        let state = JokeState {
            joke: Some(joke()),
            is_loading: false,
            error_message: Some("Invalid server response.".to_string()),
        };
        let screen = Screen::from_state(&state);
        assert_eq!(
            screen.content,
            Content::Joke {
                setup: "Why did the chicken cross the road?".to_string(),
                punchline: "To get to the other side.".to_string(),
            }
        );
        assert_eq!(screen.error_message.as_deref(), Some("Invalid server response."));
    }

    #[test]
    fn error_without_joke_keeps_placeholder() {
        let state = JokeState {
            joke: None,
            is_loading: false,
            error_message: Some("Network error: offline".to_string()),
        };
        let screen = Screen::from_state(&state);
        assert!(matches!(screen.content, Content::Placeholder { .. }));
        assert!(screen.error_message.is_some());
    }

    #[test]
    fn chrome_is_the_same_in_every_state() {
        let loading = JokeState {
            joke: None,
            is_loading: true,
            error_message: None,
        };
        for state in [JokeState::default(), loading] {
            let screen = Screen::from_state(&state);
            assert_eq!(screen.title, "Joke Time");
            assert_eq!(screen.action_label, "Hit me!");
        }
    }

    #[test]
    fn joke_lines_are_setup_then_punchline() {
        let state = JokeState {
            joke: Some(joke()),
            is_loading: false,
            error_message: None,
        };
        assert_eq!(
            Screen::from_state(&state).content.lines(),
            ("Why did the chicken cross the road?", "To get to the other side.")
        );
        let placeholder = Screen::from_state(&JokeState::default());
        assert_eq!(placeholder.content.lines(), (PLACEHOLDER_TEXT, ""));
    }
}
