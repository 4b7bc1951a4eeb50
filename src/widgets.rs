use crate::state::AppState;
use druid::kurbo::{Point, Rect, Size};
use druid::piet::Color;
use druid::piet::Text as PietText;
use druid::piet::{TextLayout, TextLayoutBuilder};
use druid::{
    BoxConstraints, Data, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx, PaintCtx,
    RenderContext, UpdateCtx, Widget,
};

/// コピーの進捗バー（処理済み件数 / 全件数）
pub struct ProgressBar;

impl Widget<AppState> for ProgressBar {
    fn event(&mut self, _ctx: &mut EventCtx, _event: &Event, _data: &mut AppState, _env: &Env) {}

    fn lifecycle(&mut self, _ctx: &mut LifeCycleCtx, _event: &LifeCycle, _data: &AppState, _env: &Env) {}

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &AppState, data: &AppState, _env: &Env) {
        if old_data.copy_done != data.copy_done
            || old_data.copy_total != data.copy_total
            || !old_data.copy_in_progress.same(&data.copy_in_progress)
        {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        Size::new(bc.max().width, 20.0)
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, env: &Env) {
        if data.copy_total == 0 {
            return;
        }
        let progress = (data.copy_done as f64 / data.copy_total as f64).min(1.0);
        let rect = ctx.size().to_rect();
        let filled_rect = Rect::new(rect.x0, rect.y0, rect.x0 + rect.width() * progress, rect.y1);
        ctx.fill(rect, &env.get(druid::theme::BACKGROUND_LIGHT));
        ctx.fill(filled_rect, &Color::rgb8(0x4C, 0xAF, 0x50));
        let text = format!("{:.0}% ({}/{})", progress * 100.0, data.copy_done, data.copy_total);
        let Ok(text_layout) = ctx.text().new_text_layout(text).text_color(Color::WHITE).build() else {
            return;
        };
        let text_size = text_layout.size();
        let text_pos = Point::new(
            rect.center().x - text_size.width / 2.0,
            rect.center().y - text_size.height / 2.0,
        );
        ctx.draw_text(&text_layout, text_pos);
    }
}
