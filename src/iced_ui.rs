use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{window, Background, Border, Color, Element, Length, Shadow, Size, Subscription, Task, Theme};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::card_store;
use crate::card_view;
use crate::domains::card::CardRecord;
use crate::interfaces::dialogs::PathPicker;
use crate::interfaces::providers::TextGenerator;
use crate::services::session::Session;
use crate::workbench::{Input, Instruction, Workbench};

#[derive(Clone)]
pub struct IcedUiLaunchConfig {
    pub generator: Arc<dyn TextGenerator>,
    pub picker: Arc<dyn PathPicker>,
    pub session: Session,
    pub output_dir: PathBuf,
}

struct CardForgeApp {
    workbench: Workbench,
    generator: Arc<dyn TextGenerator>,
    picker: Arc<dyn PathPicker>,
    composer: String,
    menu_open: bool,
    main_window: Option<window::Id>,
    cards: BTreeMap<window::Id, CardRecord>,
}

#[derive(Clone, Debug)]
enum Message {
    WindowOpened(window::Id),
    WindowClosed(window::Id),
    ComposerChanged(String),
    SendPressed,
    Generated(Box<Session>, Result<String, String>),
    ToggleFileMenu,
    LoadPressed,
    LoadFinished(Result<Option<CardRecord>, String>),
    SaveAsPressed(window::Id),
    SaveFinished(Result<Option<PathBuf>, String>),
    ExitPressed,
}

pub fn launch_ui(config: IcedUiLaunchConfig) -> iced::Result {
    let boot_config = config.clone();
    iced::daemon(
        move || {
            let mut state = CardForgeApp::new(boot_config.clone());
            let (id, open) = window::open(window::Settings {
                size: Size::new(720.0, 560.0),
                min_size: Some(Size::new(420.0, 320.0)),
                ..Default::default()
            });
            state.main_window = Some(id);
            (state, open.map(Message::WindowOpened))
        },
        update,
        view,
    )
    .title(window_title)
    .theme(window_theme)
    .subscription(subscription)
    .run()
}

fn window_title(state: &CardForgeApp, window: window::Id) -> String {
    match state.cards.get(&window) {
        Some(card) => card.name.clone(),
        None => "Card Forge".to_string(),
    }
}

fn window_theme(_state: &CardForgeApp, _window: window::Id) -> Theme {
    Theme::Dark
}

fn subscription(_state: &CardForgeApp) -> Subscription<Message> {
    window::close_events().map(Message::WindowClosed)
}

impl CardForgeApp {
    fn new(config: IcedUiLaunchConfig) -> Self {
        Self {
            workbench: Workbench::new(config.session, config.output_dir),
            generator: config.generator,
            picker: config.picker,
            composer: String::new(),
            menu_open: false,
            main_window: None,
            cards: BTreeMap::new(),
        }
    }

    fn dispatch(&mut self, input: Input) -> Task<Message> {
        let instruction = self.workbench.dispatch(input);
        self.carry_out(instruction)
    }

    fn carry_out(&mut self, instruction: Instruction) -> Task<Message> {
        match instruction {
            Instruction::Nothing => Task::none(),
            Instruction::Generate { session, prompt } => Task::perform(
                run_exchange(Arc::clone(&self.generator), session, prompt),
                |(session, outcome)| Message::Generated(Box::new(session), outcome),
            ),
            Instruction::PickCardFile => {
                let picker = Arc::clone(&self.picker);
                Task::perform(
                    async move {
                        card_store::load(picker.as_ref())
                            .await
                            .map_err(|err| err.to_string())
                    },
                    Message::LoadFinished,
                )
            }
            Instruction::ShowCard(card) => {
                let (id, open) = window::open(window::Settings {
                    size: card_view::window_size(&card),
                    ..Default::default()
                });
                self.cards.insert(id, card);
                open.map(Message::WindowOpened)
            }
            Instruction::Exit => iced::exit(),
        }
    }
}

async fn run_exchange(
    generator: Arc<dyn TextGenerator>,
    mut session: Session,
    prompt: String,
) -> (Session, Result<String, String>) {
    let outcome = session
        .exchange(generator.as_ref(), &prompt)
        .await
        .map_err(|err| err.to_string());
    (session, outcome)
}

fn update(state: &mut CardForgeApp, message: Message) -> Task<Message> {
    match message {
        Message::WindowOpened(_) => Task::none(),
        Message::WindowClosed(id) => {
            if state.main_window == Some(id) {
                return iced::exit();
            }
            state.cards.remove(&id);
            Task::none()
        }
        Message::ComposerChanged(value) => {
            state.composer = value;
            Task::none()
        }
        Message::SendPressed => {
            let instruction = state
                .workbench
                .dispatch(Input::Submit(state.composer.clone()));
            if matches!(instruction, Instruction::Generate { .. }) {
                state.composer.clear();
            }
            state.carry_out(instruction)
        }
        Message::Generated(session, outcome) => state.dispatch(Input::Generated {
            session: *session,
            outcome,
        }),
        Message::ToggleFileMenu => {
            state.menu_open = !state.menu_open;
            Task::none()
        }
        Message::LoadPressed => {
            state.menu_open = false;
            state.dispatch(Input::LoadRequested)
        }
        Message::LoadFinished(result) => state.dispatch(Input::LoadFinished(result)),
        Message::SaveAsPressed(id) => {
            let Some(card) = state.cards.get(&id).cloned() else {
                return Task::none();
            };
            let picker = Arc::clone(&state.picker);
            Task::perform(
                async move {
                    card_store::save(&card, None, picker.as_ref())
                        .await
                        .map_err(|err| err.to_string())
                },
                Message::SaveFinished,
            )
        }
        Message::SaveFinished(result) => state.dispatch(Input::SaveFinished(result)),
        Message::ExitPressed => {
            state.menu_open = false;
            state.dispatch(Input::ExitRequested)
        }
    }
}

fn view(state: &CardForgeApp, window: window::Id) -> Element<'_, Message> {
    match state.cards.get(&window) {
        Some(card) => card_view::view_card(card, Message::SaveAsPressed(window)),
        None => view_chat(state),
    }
}

fn glass_panel(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: None,
        background: Some(Background::Color(Color::from_rgba(0.10, 0.14, 0.24, 0.58))),
        border: Border {
            radius: 12.0.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.12),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn view_file_menu(state: &CardForgeApp) -> Element<'_, Message> {
    let toggle = button(text("File").size(14))
        .padding([6, 14])
        .style(if state.menu_open {
            button::primary
        } else {
            button::secondary
        })
        .on_press(Message::ToggleFileMenu);

    let mut menu = column![row![toggle]].spacing(4);
    if state.menu_open {
        let busy = state.workbench.is_busy();
        menu = menu.push(
            container(
                column![
                    button(text("Load").size(14))
                        .width(120)
                        .style(button::text)
                        .on_press_maybe((!busy).then_some(Message::LoadPressed)),
                    button(text("Exit").size(14))
                        .width(120)
                        .style(button::text)
                        .on_press(Message::ExitPressed),
                ]
                .spacing(2),
            )
            .padding(4)
            .style(glass_panel),
        );
    }
    menu.into()
}

fn view_chat(state: &CardForgeApp) -> Element<'_, Message> {
    let transcript = state
        .workbench
        .transcript()
        .iter()
        .fold(column!().spacing(6).width(Length::Fill), |col, line| {
            col.push(text(line.to_string()).size(14))
        });

    let status: Element<'_, Message> = if let Some(err) = state.workbench.error() {
        text(err.to_string()).size(13).color([0.95, 0.45, 0.45]).into()
    } else if state.workbench.is_loading() {
        text("Choose a card file...").size(13).into()
    } else if state.workbench.is_busy() {
        text("Waiting for the model...").size(13).into()
    } else {
        text(state.workbench.status().unwrap_or_default().to_string())
            .size(13)
            .color([0.65, 0.70, 0.80])
            .into()
    };

    let composer = text_input("Describe a card and press Enter", &state.composer)
        .on_input(Message::ComposerChanged)
        .on_submit(Message::SendPressed)
        .padding(10)
        .width(Length::Fill);

    column![
        view_file_menu(state),
        container(
            scrollable(container(transcript).padding([0, 12]).width(Length::Fill))
                .height(Length::Fill)
                .width(Length::Fill)
                .anchor_bottom()
        )
        .padding(8)
        .style(glass_panel)
        .width(Length::Fill)
        .height(Length::Fill),
        status,
        composer,
    ]
    .spacing(10)
    .padding(14)
    .height(Length::Fill)
    .into()
}
