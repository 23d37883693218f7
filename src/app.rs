//! The application context: one `App` is built at startup and every handler
//! works through it.

use std::cell::{Cell, Ref, RefCell};

use rand::{rngs::StdRng, SeedableRng};
use reqwest::Client;

use crate::{
    api::{self, CatApi},
    config::Config,
    data::{Category, ImageRecord, NameAssignments},
    error::{AppError, AppResult, ErrorKind},
    names::pick_random_name,
    page::Page,
    render::{render_category_options, render_results},
    storage::{load_json, save_json, KeyValueStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// empty selection, results cleared without a request
    Cleared,
    Rendered(usize),
    Failed,
    /// a later search started before this one finished
    Stale,
}

pub struct App {
    config: Config,
    api: CatApi,
    store: Box<dyn KeyValueStore>,
    page: RefCell<Page>,
    names: RefCell<NameAssignments>,
    categories: RefCell<Vec<Category>>,
    cards: RefCell<Vec<(String, String)>>,
    rng: RefCell<StdRng>,
    search_seq: Cell<u64>,
}

impl App {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>, client: Client) -> Self {
        let api = CatApi::new(client, &config.base_url, config.api_key.clone(), config.limit);
        let names = match load_json::<NameAssignments>(store.as_ref(), &config.names_key()) {
            Ok(names) => names.unwrap_or_default(),
            Err(e) => {
                log::warn!("fail to read stored names, starting empty: {e}");
                NameAssignments::default()
            }
        };
        log::debug!("loaded {} stored names", names.len());
        Self {
            config,
            api,
            store,
            page: RefCell::new(Page::new()),
            names: RefCell::new(names),
            categories: RefCell::new(Vec::new()),
            cards: RefCell::new(Vec::new()),
            rng: RefCell::new(StdRng::from_entropy()),
            search_seq: Cell::new(0),
        }
    }

    pub fn with_rng(self, rng: StdRng) -> Self {
        *self.rng.borrow_mut() = rng;
        self
    }

    pub async fn init(&self) {
        self.load_categories().await;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    pub fn names(&self) -> Ref<'_, NameAssignments> {
        self.names.borrow()
    }

    pub fn categories(&self) -> Ref<'_, Vec<Category>> {
        self.categories.borrow()
    }

    /// `(name, url)` of the cards currently shown.
    pub fn cards(&self) -> Ref<'_, Vec<(String, String)>> {
        self.cards.borrow()
    }

    /// Renders the selector from the cache, or from the remote endpoint when
    /// nothing usable is cached. Returns false if the categories could not be
    /// loaded.
    pub async fn load_categories(&self) -> bool {
        let key = self.config.categories_key();
        match load_json::<Vec<Category>>(self.store.as_ref(), &key) {
            Ok(Some(categories)) => {
                log::info!("using {} cached categories", categories.len());
                self.show_categories(categories);
                return true;
            }
            Ok(None) => log::debug!("no cached categories"),
            Err(e) => log::warn!("fail to read cached categories: {e}"),
        }

        match self.api.fetch_categories().await {
            Ok((categories, raw)) => {
                if let Err(e) = self.store.set_item(&key, &raw) {
                    log::warn!("fail to cache categories: {e}");
                }
                self.show_categories(categories);
                true
            }
            Err(e) => {
                self.handle_error(e);
                false
            }
        }
    }

    fn show_categories(&self, categories: Vec<Category>) {
        self.page.borrow_mut().category_options = render_category_options(&categories);
        *self.categories.borrow_mut() = categories;
    }

    pub async fn handle_category_change(&self, value: &str) -> SearchOutcome {
        self.search(value.trim()).await
    }

    pub async fn search(&self, category: &str) -> SearchOutcome {
        let seq = self.search_seq.get() + 1;
        self.search_seq.set(seq);
        self.page.borrow_mut().error.clear();

        if category.is_empty() {
            let mut page = self.page.borrow_mut();
            page.results.clear();
            page.set_busy(false);
            self.cards.borrow_mut().clear();
            return SearchOutcome::Cleared;
        }

        self.page.borrow_mut().set_busy(true);
        let result: AppResult<Option<Vec<ImageRecord>>> = async {
            let response = self.api.search_images(category).await?;
            tokio::time::sleep(self.config.parse_delay).await;
            api::parse_images(response).await
        }
        .await;

        if !self.is_current(seq) {
            log::debug!("dropping stale results for category {category}");
            return SearchOutcome::Stale;
        }

        match result {
            Ok(data) => {
                let outcome = self.show_results(data);
                tokio::time::sleep(self.config.settle_delay).await;
                if self.is_current(seq) {
                    self.page.borrow_mut().set_busy(false);
                }
                outcome
            }
            Err(e) => {
                self.page.borrow_mut().set_busy(false);
                self.handle_error(e);
                SearchOutcome::Failed
            }
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.search_seq.get() == seq
    }

    /// Renders one card per record and persists the name mapping if it grew.
    pub fn show_results(&self, data: Option<Vec<ImageRecord>>) -> SearchOutcome {
        let Some(records) = data else {
            self.handle_error(AppError::Generic("Sorry, no results".to_string()));
            return SearchOutcome::Failed;
        };

        let (html, cards, new_entry) = {
            let mut names = self.names.borrow_mut();
            let mut rng = self.rng.borrow_mut();
            render_results(&records, &mut names, || pick_random_name(&mut *rng))
        };
        self.page.borrow_mut().results = html;
        *self.cards.borrow_mut() = cards;

        if new_entry {
            let names = self.names.borrow();
            match save_json(self.store.as_ref(), &self.config.names_key(), &*names) {
                Ok(()) => log::debug!("stored {} names", names.len()),
                Err(e) => log::warn!("fail to store names: {e}"),
            }
        }
        SearchOutcome::Rendered(records.len())
    }

    pub fn handle_error(&self, err: AppError) {
        match err.kind() {
            ErrorKind::Unexpected => log::error!("{err}"),
            ErrorKind::Network | ErrorKind::Generic => log::warn!("{err}"),
        }
        let mut page = self.page.borrow_mut();
        page.error = err.message();
        page.focus_selector();
    }
}
