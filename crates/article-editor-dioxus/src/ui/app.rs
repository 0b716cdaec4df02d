use crate::ui::components::image_block::read_image;
use crate::ui::components::{BlockView, ErrorScreen, NoticeArea, SaveStatus, TitleField, Toolbar};
use article_editor_config::Config;
use article_editor_engine::editing::{BlockId, Cmd};
use article_editor_engine::io::{Backend, HttpBackend};
use article_editor_engine::session::{EditorSession, SaveTicket, SessionSettings};
use dioxus::core::Task;
use dioxus::html::FileData;
use dioxus::prelude::*;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

const EDITOR_CSS: &str = include_str!("../assets/editor.css");

/// Longest the notice timer sleeps before looking again, so a notice pushed
/// mid-sleep still expires on time
const NOTICE_POLL: Duration = Duration::from_millis(200);

/// Backend handle that can be passed as a component prop.
#[derive(Clone)]
pub struct SharedBackend(Arc<dyn Backend>);

impl SharedBackend {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self(Arc::new(backend))
    }
}

impl PartialEq for SharedBackend {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedBackend {
    type Target = dyn Backend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

pub fn session_settings(config: &Config) -> SessionSettings {
    SessionSettings {
        autosave_delay: config.autosave_delay(),
        max_upload_bytes: config.max_upload_bytes,
        placeholder: config.placeholder.clone(),
        save_notice: config.save_notice(),
        error_notice: config.error_notice(),
    }
}

#[component]
pub fn App(config: Config) -> Element {
    let backend = use_hook(|| {
        HttpBackend::new(&config.backend_url)
            .map(SharedBackend::new)
            .map_err(|e| e.to_string())
    });

    let body = match backend {
        Ok(backend) => rsx! {
            Editor { backend, settings: session_settings(&config) }
        },
        Err(details) => rsx! {
            ErrorScreen {
                title: "Invalid backend URL".to_string(),
                message: format!("Cannot reach the article backend at '{}'", config.backend_url),
                details: Some(details),
            }
        },
    };

    rsx! {
        style { {EDITOR_CSS} }
        {body}
    }
}

#[component]
fn Editor(backend: SharedBackend, settings: SessionSettings) -> Element {
    let mut session = use_signal(|| EditorSession::new(settings.clone()));
    let mut menu_open = use_signal(|| false);
    let mut pending_save = use_signal(|| None::<Task>);

    // Fetch the article once on mount
    use_future({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            async move {
                if !session.write().begin_load() {
                    return;
                }
                let result = backend.load().await;
                session.write().finish_load(result);
            }
        }
    });

    // Expire notices as their time runs out
    use_future(move || async move {
        loop {
            let next = session.peek().next_notice_expiry();
            match notice_wait(next) {
                Some(wait) => tokio::time::sleep(wait).await,
                None => {
                    session.write().prune_notices();
                }
            }
        }
    });

    let on_command = use_callback({
        let backend = backend.clone();
        move |cmd: Cmd| {
            let result = session.write().apply(cmd);
            match result {
                Ok(patch) if patch.persist => {
                    schedule_autosave(session, pending_save, backend.clone());
                }
                Ok(_) => {}
                Err(e) => log::warn!("Ignoring editor command: {e}"),
            }
        }
    });

    let on_file = use_callback({
        let backend = backend.clone();
        move |(id, file): (BlockId, FileData)| {
            // Rejections are already logged and shown by the session
            if session.write().check_upload_size(id, file.size()).is_err() {
                return;
            }
            let backend = backend.clone();
            spawn(async move {
                let Some(image) = read_image(file).await else {
                    return;
                };
                if session.write().begin_upload(id, &image).is_err() {
                    return;
                }
                let result = backend.upload_image(&image).await;
                session.write().finish_upload(id, result);
                schedule_autosave(session, pending_save, backend);
            });
        }
    });

    let on_title = use_callback({
        let backend = backend.clone();
        move |title: String| {
            session.write().set_title(title);
            schedule_autosave(session, pending_save, backend.clone());
        }
    });

    let save_now = use_callback({
        let backend = backend.clone();
        move |_: ()| {
            if let Some(task) = pending_save.write().take() {
                task.cancel();
            }
            let ticket = session.write().begin_save();
            spawn(run_save(session, backend.clone(), ticket));
        }
    });

    let state = session.read();
    let focused = state.editor().focused();
    let blocks: Vec<_> = state
        .editor()
        .blocks()
        .iter()
        .map(|block| (block.id, block.clone(), state.block_notice(block.id).cloned()))
        .collect();
    let notices = state.page_notices();
    let title = state.title().to_string();
    let page_title = state.page_title().to_string();
    let last_saved = state.last_saved_display().to_string();
    drop(state);

    rsx! {
        document::Title { "{page_title}" }
        div {
            class: "editor-page",
            tabindex: "-1",
            onkeydown: move |event: Event<KeyboardData>| {
                if is_save_shortcut(&event.key(), event.modifiers()) {
                    event.prevent_default();
                    save_now.call(());
                }
            },
            onclick: move |_| menu_open.set(false),
            div {
                class: "editor-header",
                TitleField { title, on_input: on_title }
                SaveStatus { last_saved }
            }
            Toolbar {
                menu_open: menu_open(),
                on_toggle_menu: move |_| menu_open.set(!menu_open()),
                on_add_text: move |style| {
                    menu_open.set(false);
                    on_command.call(Cmd::AddTextBlock { style, text: None });
                },
                on_add_image: move |_| on_command.call(Cmd::AddImageBlock { src: None }),
                on_save: move |_| save_now.call(()),
            }
            div {
                class: "editor",
                for (id, block, status) in blocks {
                    BlockView {
                        key: "{id}",
                        focused: focused == Some(id),
                        block,
                        status,
                        on_command,
                        on_file,
                    }
                }
            }
            NoticeArea { notices }
        }
    }
}

/// Replace the pending autosave task with one that waits out the session's
/// quiet period. Does nothing when no save is pending.
fn schedule_autosave(
    mut session: Signal<EditorSession>,
    mut pending_save: Signal<Option<Task>>,
    backend: SharedBackend,
) {
    let Some(delay) = session.peek().pending_save_delay() else {
        return;
    };
    if let Some(task) = pending_save.write().take() {
        task.cancel();
    }

    let task = spawn(async move {
        let mut wait = delay;
        loop {
            tokio::time::sleep(wait).await;
            match session.peek().pending_save_delay() {
                Some(left) if !left.is_zero() => wait = left,
                Some(_) => break,
                None => {
                    pending_save.set(None);
                    return;
                }
            }
        }
        // Past this point the save must not be cancelled by a newer edit
        pending_save.set(None);
        let ticket = session.write().take_due_save();
        if let Some(ticket) = ticket {
            run_save(session, backend, ticket).await;
        }
    });
    pending_save.set(Some(task));
}

async fn run_save(mut session: Signal<EditorSession>, backend: SharedBackend, ticket: SaveTicket) {
    let result = backend.save(&ticket.document).await;
    session.write().finish_save(&ticket, result);
}

/// How long the notice timer should sleep, or `None` when a notice is due
/// for pruning now.
fn notice_wait(next_expiry: Option<Duration>) -> Option<Duration> {
    match next_expiry {
        Some(wait) if wait.is_zero() => None,
        Some(wait) => Some(wait.min(NOTICE_POLL)),
        None => Some(NOTICE_POLL),
    }
}

/// Ctrl+S, or Cmd+S on macOS
fn is_save_shortcut(key: &Key, modifiers: Modifiers) -> bool {
    (modifiers.ctrl() || modifiers.meta())
        && matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("s"))
}
