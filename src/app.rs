use crate::api::{ApiClient, WebhookUploader};
use crate::components::page_toggle;
use crate::config::DashboardConfig;
use crate::image_pipeline::{Illustration, PicturePipeline, RemotePicture};
use crate::message::Message;
use crate::model::upload::upload_events;
use crate::model::{
    resolve_scene, DiagnosticPayload, Page, Patient, PatientId, ReportState, SceneBase, UploadQueue,
    ViewerScene,
};
use crate::views::{anatomy_viewer_panel, patient_list_panel, report_panel, uploader_panel};
use iced::widget::text::Wrapping;
use iced::widget::{column, container, row, scrollable, text};
use iced::{application, Alignment, Element, Length, Task, Theme};
use rfd::AsyncFileDialog;
use std::collections::HashMap;

const APP_TITLE: &str = "VetLens";

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let (config, config_error) = match DashboardConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => {
            log::error!("{err}, falling back to defaults");
            (DashboardConfig::default(), Some(err.to_string()))
        }
    };

    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .run_with(move || App::new(config, config_error))
}

pub struct App {
    config: DashboardConfig,
    api: Option<ApiClient>,
    uploader: Option<WebhookUploader>,
    pictures: PicturePipeline,
    page: Page,
    patients: Vec<Patient>,
    selected_patient: Option<PatientId>,
    payload: Option<DiagnosticPayload>,
    loading: bool,
    report: ReportState,
    remote_pictures: HashMap<String, RemotePicture>,
    scene: Option<ViewerScene>,
    illustration: Option<Result<Illustration, String>>,
    uploads: UploadQueue,
    last_error: Option<String>,
}

impl App {
    pub fn new(config: DashboardConfig, config_error: Option<String>) -> (Self, Task<Message>) {
        let mut errors: Vec<String> = config_error.into_iter().collect();

        let api = ApiClient::new(config.api_base.clone())
            .map_err(|err| {
                log::error!("Diagnosis API client unavailable: {err}");
                errors.push(err.to_string());
            })
            .ok();
        let uploader = WebhookUploader::new(config.upload_webhook.clone())
            .map_err(|err| {
                log::error!("Upload client unavailable: {err}");
                errors.push(err.to_string());
            })
            .ok();

        let task = match &api {
            Some(api) => {
                let api = api.clone();
                Task::perform(async move { api.fetch_roster().await }, Message::RosterLoaded)
            }
            None => Task::none(),
        };

        let mut app = Self {
            pictures: PicturePipeline::new(config.assets_dir.clone()),
            config,
            api,
            uploader,
            page: Page::default(),
            patients: Vec::new(),
            selected_patient: None,
            payload: None,
            loading: false,
            report: ReportState::default(),
            remote_pictures: HashMap::new(),
            scene: None,
            illustration: None,
            uploads: UploadQueue::default(),
            last_error: (!errors.is_empty()).then(|| errors.join("\n")),
        };
        app.refresh_scene();

        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        self.refresh_scene();
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SetPage(page) => {
                if self.page != page {
                    self.page = page;
                }
                Task::none()
            }
            Message::RosterLoaded(result) => {
                self.patients = result.unwrap_or_else(|err| {
                    log::error!("Failed to load patient roster: {err}");
                    Vec::new()
                });
                log::info!("Loaded {} patients", self.patients.len());

                let first = self.patients.first().map(|patient| patient.id.clone());
                match first {
                    Some(id) if self.selected_patient.is_none() => self.select_patient(id),
                    _ => Task::none(),
                }
            }
            Message::SelectPatient(id) => {
                if self.selected_patient.as_ref() == Some(&id) {
                    return Task::none();
                }
                self.select_patient(id)
            }
            Message::DiagnosisLoaded(id, result) => {
                if self.selected_patient.as_ref() != Some(&id) {
                    log::debug!("Ignoring stale diagnosis for patient {id}");
                    return Task::none();
                }
                self.loading = false;
                self.payload = result
                    .map_err(|err| log::error!("Failed to load diagnosis for {id}: {err}"))
                    .ok();
                self.fetch_images_if_needed()
            }
            Message::SetTab(tab) => {
                self.report.set_tab(tab);
                self.fetch_images_if_needed()
            }
            Message::SelectStudy(selection) => {
                self.report.select_study(self.payload.as_ref(), selection);
                Task::none()
            }
            Message::ImagesLoaded(folder, result) => {
                let urls = result.unwrap_or_else(|err| {
                    log::error!("Failed to list images in {folder}: {err}");
                    Vec::new()
                });
                if self.report.finish_image_fetch(&folder, urls.clone()) {
                    self.fetch_pictures(urls)
                } else {
                    Task::none()
                }
            }
            Message::PictureLoaded(url, result) => {
                let picture = match result {
                    Ok(picture) => RemotePicture::Ready(picture),
                    Err(err) => {
                        log::warn!("Failed to load image {url}: {err}");
                        RemotePicture::Failed
                    }
                };
                // Downloads for a patient that is no longer selected are dropped.
                if let Some(entry) = self.remote_pictures.get_mut(&url) {
                    *entry = picture;
                }
                Task::none()
            }
            Message::SelectImage(url) => {
                self.report.select_image(url.clone());
                self.fetch_pictures(vec![url])
            }
            Message::ClearImage => {
                self.report.clear_image();
                Task::none()
            }
            Message::PickPdfs => {
                if self.uploads.is_running() {
                    return Task::none();
                }
                Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .add_filter("PDF", &["pdf"])
                            .pick_files()
                            .await
                            .map(|handles| {
                                handles
                                    .into_iter()
                                    .map(|handle| handle.path().to_path_buf())
                                    .collect()
                            })
                            .unwrap_or_default()
                    },
                    Message::PdfsPicked,
                )
            }
            Message::PdfsPicked(paths) => {
                if paths.is_empty() || self.uploads.is_running() {
                    return Task::none();
                }
                self.uploads.replace(paths);
                log::info!("Selected {} PDFs for upload", self.uploads.items().len());
                Task::none()
            }
            Message::SendPdfs => {
                let Some(uploader) = self.uploader.clone() else {
                    self.last_error = Some("Upload webhook is not available".to_string());
                    return Task::none();
                };
                if !self.uploads.can_send() {
                    return Task::none();
                }
                let jobs = self.uploads.start();
                Task::run(upload_events(uploader, jobs), Message::Upload)
            }
            Message::Upload(event) => {
                self.uploads.apply(event);
                Task::none()
            }
        }
    }

    /// Re-resolves the viewer scene and reloads its drawings from disk only
    /// when the scene actually changed.
    fn refresh_scene(&mut self) {
        let scene = resolve_scene(
            self.breed(),
            self.report.active_organs(),
            self.report.selected_image(),
        );
        if self.scene.as_ref() == Some(&scene) {
            return;
        }

        if let SceneBase::Asset(base) = &scene.base {
            self.illustration = Some(self.pictures.illustration(base, scene.visible_overlays()));
        }
        self.scene = Some(scene);
    }

    fn breed(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|payload| payload.patient.breed.as_deref())
            .or_else(|| {
                self.selected_patient.as_ref().and_then(|id| {
                    self.patients
                        .iter()
                        .find(|patient| &patient.id == id)
                        .and_then(|patient| patient.breed.as_deref())
                })
            })
    }

    fn select_patient(&mut self, id: PatientId) -> Task<Message> {
        self.selected_patient = Some(id.clone());
        self.payload = None;
        self.report.reset();
        self.remote_pictures.clear();

        let Some(api) = self.api.clone() else {
            return Task::none();
        };
        self.loading = true;
        Task::perform(
            async move {
                let result = api.fetch_diagnosis(&id).await;
                (id, result)
            },
            |(id, result)| Message::DiagnosisLoaded(id, result),
        )
    }

    fn fetch_images_if_needed(&mut self) -> Task<Message> {
        let Some(folder) = self.report.pending_image_fetch(self.payload.as_ref()) else {
            return Task::none();
        };
        let Some(api) = self.api.clone() else {
            return Task::none();
        };

        self.report.begin_image_fetch(folder.clone());
        Task::perform(
            async move {
                let result = api.fetch_images(&folder).await;
                (folder, result)
            },
            |(folder, result)| Message::ImagesLoaded(folder, result),
        )
    }

    /// Starts a download for every URL not already cached or in flight.
    fn fetch_pictures(&mut self, urls: Vec<String>) -> Task<Message> {
        let Some(api) = self.api.clone() else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for url in urls {
            if self.remote_pictures.contains_key(&url) {
                continue;
            }
            self.remote_pictures.insert(url.clone(), RemotePicture::Loading);

            let api = api.clone();
            tasks.push(Task::perform(
                async move {
                    let result = api
                        .fetch_bytes(&url)
                        .await
                        .map_err(|err| err.to_string())
                        .and_then(PicturePipeline::remote);
                    (url, result)
                },
                |(url, result)| Message::PictureLoaded(url, result),
            ));
        }

        Task::batch(tasks)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            text(APP_TITLE).size(24),
            container(page_toggle(self.page))
                .width(Length::Fill)
                .align_x(Alignment::End),
        ]
        .align_y(Alignment::Center);

        let body = match self.page {
            Page::Dashboard => self.dashboard(),
            Page::Uploader => container(uploader_panel(&self.uploads, &self.config.upload_webhook))
                .padding(16)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        };

        let mut content = column![header, body].padding(20).spacing(20);
        if let Some(error) = &self.last_error {
            content = content.push(text(error).size(16).wrapping(Wrapping::Word));
        }
        content.into()
    }

    fn dashboard(&self) -> Element<'_, Message> {
        let patient_panel = container(scrollable(patient_list_panel(
            &self.patients,
            self.selected_patient.as_ref(),
        )))
        .padding(16)
        .width(Length::FillPortion(2));

        let viewer: Element<'_, Message> = match &self.scene {
            Some(scene) => anatomy_viewer_panel(
                scene,
                self.illustration.as_ref(),
                &self.remote_pictures,
            ),
            None => text("Preparing illustration…").into(),
        };
        let viewer = container(viewer)
            .padding(16)
            .width(Length::Fill)
            .height(Length::FillPortion(3));

        let report = container(report_panel(
            self.payload.as_ref(),
            self.loading,
            &self.report,
            &self.remote_pictures,
        ))
        .padding(16)
        .width(Length::Fill)
        .height(Length::FillPortion(2));

        row![
            patient_panel,
            column![viewer, report]
                .spacing(16)
                .width(Length::FillPortion(5)),
        ]
        .spacing(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
