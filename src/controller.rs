use crate::events::{COPY_DONE, COPY_PROGRESS};
use crate::state::AppState;
use druid::{Env, Event, EventCtx, Widget};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

pub struct AppController;

impl<W: Widget<AppState>> druid::widget::Controller<AppState, W> for AppController {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut AppState,
        env: &Env,
    ) {
        if let Event::Command(cmd) = event {
            if let Some(&progress) = cmd.get(COPY_PROGRESS) {
                data.copy_done = progress;
                ctx.request_update();
                ctx.set_handled();
                return;
            }
            if let Some(finished) = cmd.get(COPY_DONE) {
                data.copy_in_progress = false;
                data.status_message = format!("{} in {}", finished.summary, finished.target_dir);
                // 完了ダイアログ（失敗があれば一覧を付ける）
                let (title, level, description) = if finished.failures.is_empty() {
                    ("Success", MessageLevel::Info, data.status_message.clone())
                } else {
                    (
                        "Finished with errors",
                        MessageLevel::Warning,
                        format!("{}\n\n{}", data.status_message, finished.failures.join("\n")),
                    )
                };
                std::thread::spawn(move || {
                    MessageDialog::new()
                        .set_title(title)
                        .set_description(&description)
                        .set_buttons(MessageButtons::Ok)
                        .set_level(level)
                        .show();
                });
                ctx.request_update();
                ctx.set_handled();
                return;
            }
        }
        child.event(ctx, event, data, env);
    }
}
