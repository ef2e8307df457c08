use eframe::egui;

pub const WINDOW_TITLE: &str = "PNGTuber App";
pub const GREETING: &str = "Hola PNGTuber 👾";
pub const CONNECT_LABEL: &str = "Connect";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Label(String),
    Button(String),
}

/// What the window shows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: String,
    pub widgets: Vec<Widget>,
}

impl Layout {
    #[must_use]
    pub fn pngtuber() -> Self {
        Self {
            title: String::from(WINDOW_TITLE),
            widgets: vec![
                Widget::Label(String::from(GREETING)),
                Widget::Button(String::from(CONNECT_LABEL)),
            ],
        }
    }
}

/// Opens the window and blocks until the user closes it.
pub fn launch(options: &crate::options::Options) -> eframe::Result<()> {
    let layout = Layout::pngtuber();
    let title = layout.title.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([options.window.width, options.window.height]),
        ..Default::default()
    };

    log::debug!("Window: Opening {title:?}");
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(PngTuberApp { layout }))),
    )
}

pub struct PngTuberApp {
    layout: Layout,
}

impl eframe::App for PngTuberApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                for widget in &self.layout.widgets {
                    match widget {
                        Widget::Label(text) => {
                            ui.label(text.as_str());
                        }
                        // Inert: a click is only logged.
                        Widget::Button(text) => {
                            if ui.button(text.as_str()).clicked() {
                                log::debug!("Window: {text:?} clicked");
                            }
                        }
                    }
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_fixed() {
        assert_eq!(Layout::pngtuber().title, "PNGTuber App");
    }

    #[test]
    fn one_label_and_one_button() {
        let widgets = Layout::pngtuber().widgets;
        let labels = widgets
            .iter()
            .filter(|widget| matches!(widget, Widget::Label(_)))
            .collect::<Vec<_>>();
        let buttons = widgets
            .iter()
            .filter(|widget| matches!(widget, Widget::Button(_)))
            .collect::<Vec<_>>();
        assert_eq!(labels, [&Widget::Label(String::from("Hola PNGTuber 👾"))]);
        assert_eq!(buttons, [&Widget::Button(String::from("Connect"))]);
    }

    #[test]
    fn greeting_comes_first() {
        assert_eq!(
            Layout::pngtuber().widgets.first(),
            Some(&Widget::Label(String::from(GREETING)))
        );
    }
}
