use crate::controller::AppController;
use crate::save::{add_folder, clear, save_files, select_files};
use crate::state::AppState;
use crate::widgets::ProgressBar;
use druid::im::Vector;
use druid::lens::Map;
use druid::piet::Color;
use druid::widget::{
    Button, Checkbox, CrossAxisAlignment, Flex, Label, LineBreaking, List, RadioGroup, Scroll,
    TextBox,
};
use druid::{Env, Widget, WidgetExt};
use uuid_file_namer::selection::display_name;
use uuid_file_namer::UuidScheme;

pub fn build_ui() -> impl Widget<AppState> {
    const LABEL_WIDTH: f64 = 120.0;

    let header = Flex::column()
        .with_child(Label::new("UUID File Name Generator").with_text_size(24.0))
        .with_spacer(4.0)
        .with_child(
            Label::new("Drag and drop files onto the app icon or click to select files")
                .with_text_color(Color::grey(0.6)),
        );

    // 上段: ファイル選択
    let select_row = Flex::row()
        .with_child(
            Button::new("Select Files")
                .on_click(|_ctx, data: &mut AppState, _env| select_files(data))
                .disabled_if(|data: &AppState, _env| data.copy_in_progress)
                .fix_size(140.0, 40.0),
        )
        .with_spacer(10.0)
        .with_child(
            Button::new("Add Folder")
                .on_click(|_ctx, data: &mut AppState, _env| add_folder(data))
                .disabled_if(|data: &AppState, _env| data.copy_in_progress)
                .fix_size(140.0, 40.0),
        );

    let folder_row = Flex::row()
        .with_child(Checkbox::new("Include subdirectories").lens(AppState::include_subdirectories))
        .with_spacer(10.0)
        .with_child(Label::new("Exclude:").fix_width(LABEL_WIDTH / 2.0))
        .with_flex_child(TextBox::new().lens(AppState::exclude_pattern).fix_height(30.0), 1.0);

    // 選択済みファイル一覧（表示モードと一緒に渡す）
    let source_list = List::new(|| {
        Label::new(|item: &(bool, String), _env: &Env| display_name(&item.1, item.0).to_string())
            .with_line_break_mode(LineBreaking::WordWrap)
            .expand_width()
    })
    .lens(Map::new(
        |data: &AppState| (data.show_full_paths, data.sources.clone()),
        |data: &mut AppState, (_, sources): (bool, Vector<String>)| data.sources = sources,
    ));

    let list_panel = Flex::column()
        .with_child(Label::new(|data: &AppState, _env: &Env| {
            format!("Selected Files: ({})", data.sources.len())
        }))
        .with_spacer(5.0)
        .with_flex_child(Scroll::new(source_list).vertical().expand(), 1.0)
        .with_spacer(5.0)
        .with_child(Checkbox::new("Show Full Paths").lens(AppState::show_full_paths))
        .cross_axis_alignment(CrossAxisAlignment::Start);

    // 下段: 方式とオプション
    let scheme_row = Flex::row()
        .with_child(Label::new("UUID type:").fix_width(LABEL_WIDTH))
        .with_child(
            RadioGroup::row(
                UuidScheme::ALL
                    .into_iter()
                    .map(|scheme| (scheme.label(), scheme.label().to_string())),
            )
            .lens(AppState::scheme),
        );

    let option_col = Flex::column()
        .with_child(Checkbox::new("Hash file path for UUID3/UUID5").lens(AppState::hash_source_path))
        .with_spacer(6.0)
        .with_child(Checkbox::new("Legacy extension split").lens(AppState::legacy_extension_split))
        .with_spacer(6.0)
        .with_child(Checkbox::new("Continue after errors").lens(AppState::continue_on_error))
        .cross_axis_alignment(CrossAxisAlignment::Start);

    let button_row = Flex::row()
        .with_child(
            Button::new("Save Files")
                .on_click(|ctx, data: &mut AppState, _env| save_files(ctx, data))
                .disabled_if(|data: &AppState, _env| !data.can_save())
                .fix_size(140.0, 44.0),
        )
        .with_spacer(10.0)
        .with_child(
            Button::new("Clear")
                .on_click(|_ctx, data: &mut AppState, _env| clear(data))
                .disabled_if(|data: &AppState, _env| data.copy_in_progress)
                .fix_size(100.0, 36.0),
        );

    Flex::column()
        .with_child(header)
        .with_spacer(10.0)
        .with_child(select_row)
        .with_spacer(8.0)
        .with_child(folder_row)
        .with_spacer(10.0)
        .with_flex_child(list_panel, 1.0)
        .with_spacer(10.0)
        .with_child(scheme_row)
        .with_spacer(8.0)
        .with_child(option_col)
        .with_spacer(12.0)
        .with_child(button_row)
        .with_spacer(10.0)
        .with_child(
            Label::new(|data: &String, _env: &Env| data.clone())
                .with_line_break_mode(LineBreaking::WordWrap)
                .lens(AppState::status_message),
        )
        .with_spacer(10.0)
        .with_child(ProgressBar)
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .padding(10.0)
        .expand()
        .controller(AppController)
}
