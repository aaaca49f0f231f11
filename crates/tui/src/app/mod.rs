use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use image::GrayImage;

use engine::{FormField, FormInput, HttpQrApi, Pipeline, Presenter, RequestResult, Results};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    created: Instant,
}

impl ToastState {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created.elapsed() >= TOAST_TTL
    }
}

#[derive(Debug)]
pub struct FormUi {
    pub input: FormInput,
    pub focus: FormField,
}

impl FormUi {
    fn advance_focus(&mut self) {
        self.focus = self.focus.next();
    }

    fn retreat_focus(&mut self) {
        self.focus = self.focus.next().next();
    }

    fn active_field_mut(&mut self) -> &mut String {
        self.input.get_mut(self.focus)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub form: FormUi,
    pub presenter: Presenter,
    /// Decoded copy of the displayed image for the terminal preview.
    pub preview: Option<GrayImage>,
    pub last_result_at: Option<DateTime<Local>>,
    pub toast: Option<ToastState>,
    pub api_url: String,
}

impl AppState {
    pub fn result(&self) -> Option<&RequestResult> {
        self.presenter.result()
    }

    /// Stores a pipeline result and refreshes everything derived from it.
    fn apply(&mut self, result: RequestResult) {
        let terminal = result.is_terminal();
        self.preview = result
            .payload()
            .and_then(|image| match image::load_from_memory(image.bytes()) {
                Ok(decoded) => Some(decoded.to_luma8()),
                Err(err) => {
                    tracing::warn!("cannot decode QR image for preview: {err}");
                    None
                }
            });

        if let Err(err) = self.presenter.apply(result) {
            tracing::error!("failed to store QR image: {err}");
            self.toast = Some(ToastState::new(
                ToastLevel::Error,
                format!("Obrázek nelze uložit: {err}"),
            ));
        }
        if terminal {
            self.last_result_at = Some(Local::now());
        }
    }
}

pub struct App {
    config: AppConfig,
    pipeline: Pipeline<HttpQrApi>,
    results: Results,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, prefill: FormInput) -> Result<Self> {
        let api = Arc::new(HttpQrApi::new(&config.api_url, config.request_timeout())?);
        let (pipeline, results) = Pipeline::new(api, config.debounce());

        let state = AppState {
            form: FormUi {
                input: prefill,
                focus: FormField::Account,
            },
            presenter: Presenter::new(&config.image_dir),
            preview: None,
            last_result_at: None,
            toast: None,
            api_url: config.api_url.clone(),
        };

        Ok(Self {
            config,
            pipeline,
            results,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let input = &self.state.form.input;
        if FormField::ALL
            .into_iter()
            .any(|field| !input.get(field).trim().is_empty())
        {
            self.pipeline.on_input(input);
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(50);

        while !self.should_quit {
            self.drain_results();
            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn drain_results(&mut self) {
        while let Some(result) = self.results.try_next() {
            tracing::debug!(
                generation = self.pipeline.generation(),
                state = result.state().label(),
                "presenting result"
            );
            self.state.apply(result);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::NextField => {
                self.state.form.advance_focus();
            }
            AppAction::PrevField => {
                self.state.form.retreat_focus();
            }
            AppAction::Backspace => {
                self.state.form.active_field_mut().pop();
                self.form_changed();
            }
            AppAction::ClearField => {
                self.state.form.active_field_mut().clear();
                self.form_changed();
            }
            AppAction::Input(ch) => {
                self.state.form.active_field_mut().push(ch);
                self.form_changed();
            }
            AppAction::Save => {
                self.save_copy();
            }
            AppAction::None => {}
        }
    }

    fn form_changed(&mut self) {
        self.pipeline.on_input(&self.state.form.input);
    }

    /// Copies the displayed image to `save_path`; the handle's own file goes
    /// away with the next result.
    fn save_copy(&mut self) {
        let Some(path) = self.state.presenter.image_path() else {
            self.state.toast = Some(ToastState::new(
                ToastLevel::Error,
                "Není co uložit.",
            ));
            return;
        };

        let target = self.config.save_path.as_str();
        self.state.toast = Some(match std::fs::copy(path, target) {
            Ok(_) => {
                tracing::info!(target, "QR image saved");
                ToastState::new(ToastLevel::Success, format!("Uloženo do {target}"))
            }
            Err(err) => {
                tracing::error!("failed to save QR image to {target}: {err}");
                ToastState::new(ToastLevel::Error, format!("Uložení selhalo: {err}"))
            }
        });
    }
}
