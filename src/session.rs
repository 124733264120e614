/// Application-level store: selected character, screen routing, score and tooltip.
use crate::timers::{Scheduler, TimerAction, TimerId};

/// How long a tooltip stays up.
const TOOLTIP_SECONDS: f32 = 1.8;
/// Points awarded per collected star.
const STAR_POINTS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Character {
    Ailani,
    Aylin,
    Carolina,
}

impl Character {
    pub fn name(self) -> &'static str {
        match self {
            Character::Ailani => "Ailani",
            Character::Aylin => "Aylin",
            Character::Carolina => "Carolina",
        }
    }

    /// Outfit color, 0xRRGGBB.
    pub fn outfit(self) -> u32 {
        match self {
            Character::Ailani => 0x8e44ad,
            Character::Aylin => 0x7b1fa2,
            Character::Carolina => 0xe91e63,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ailani" => Some(Character::Ailani),
            "aylin" => Some(Character::Aylin),
            "carolina" => Some(Character::Carolina),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Game,
    MathWorld,
    WordWorld,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Game => "game",
            Screen::MathWorld => "math world",
            Screen::WordWorld => "word world",
        }
    }
}

pub struct Session {
    pub character: Character,
    pub screen: Screen,
    pub stars: u32,
    pub points: u32,
    pub tooltip: Option<String>,
    tooltip_timer: Option<TimerId>,
    timers: Scheduler,
    fired: Vec<TimerAction>,
}

impl Session {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            screen: Screen::Start,
            stars: 0,
            points: 0,
            tooltip: None,
            tooltip_timer: None,
            timers: Scheduler::new(),
            fired: Vec::with_capacity(4),
        }
    }

    pub fn set_character(&mut self, character: Character) {
        self.character = character;
    }

    pub fn start_game(&mut self) {
        self.set_screen(Screen::Game);
    }

    /// Back to the start screen. Resets the score and drops every pending timer.
    pub fn go_back(&mut self) {
        self.timers.cancel_all();
        self.tooltip_timer = None;
        self.tooltip = None;
        self.stars = 0;
        self.points = 0;
        self.set_screen(Screen::Start);
    }

    pub fn enter_math_world(&mut self) {
        self.set_screen(Screen::MathWorld);
    }

    pub fn leave_math_world(&mut self) {
        self.set_screen(Screen::Game);
    }

    pub fn enter_word_world(&mut self) {
        self.set_screen(Screen::WordWorld);
    }

    pub fn leave_word_world(&mut self) {
        self.set_screen(Screen::Game);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("screen: {} -> {}", self.screen.label(), screen.label());
            self.screen = screen;
        }
    }

    /// Returns the new star count.
    pub fn collect_star(&mut self) -> u32 {
        self.stars += 1;
        self.points += STAR_POINTS;
        self.stars
    }

    /// Show `text`, replacing any current tooltip and restarting the clear timer.
    pub fn show_tooltip(&mut self, text: impl Into<String>) {
        if let Some(prev) = self.tooltip_timer.take() {
            self.timers.cancel(prev);
        }
        self.tooltip = Some(text.into());
        self.tooltip_timer = Some(self.timers.schedule(TOOLTIP_SECONDS, TimerAction::ClearTooltip));
    }

    pub fn schedule(&mut self, delay: f32, action: TimerAction) -> TimerId {
        self.timers.schedule(delay, action)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Fire due timers. Screen changes they cause are picked up by the farm.
    pub fn update(&mut self, dt: f32) {
        self.timers.advance(dt, &mut self.fired);
        let mut fired = std::mem::take(&mut self.fired);
        for action in fired.drain(..) {
            match action {
                TimerAction::ClearTooltip => {
                    self.tooltip = None;
                    self.tooltip_timer = None;
                }
                TimerAction::ShowTooltip(text) => self.show_tooltip(text),
                TimerAction::Enter(screen) => match screen {
                    Screen::MathWorld => self.enter_math_world(),
                    Screen::WordWorld => self.enter_word_world(),
                    Screen::Game => self.start_game(),
                    Screen::Start => self.set_screen(Screen::Start),
                },
            }
        }
        self.fired = fired;
    }
}
