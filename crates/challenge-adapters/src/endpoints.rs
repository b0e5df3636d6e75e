use challenge_core::ApiError;
use url::Url;

/// Rutas del servidor para un producto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
    product_slug: String,
}

impl Endpoints {
    pub fn new(base_url: &str, product_slug: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url).map_err(|e| ApiError::Transport(format!("invalid base url '{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let product_slug = product_slug.trim().trim_matches('/').to_string();
        if product_slug.is_empty() {
            return Err(ApiError::Transport("product slug is empty".into()));
        }
        Ok(Self { base, product_slug })
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("cannot build url for '{path}': {e}")))
    }

    pub fn product_slug(&self) -> &str {
        &self.product_slug
    }

    /// `/<slug>/challenge/create/`
    pub fn create(&self) -> Result<Url, ApiError> {
        self.join(&format!("{}/challenge/create/", self.product_slug))
    }

    /// `/<slug>/challenge/bounty-table/`
    pub fn bounty_table(&self) -> Result<Url, ApiError> {
        self.join(&format!("{}/challenge/bounty-table/", self.product_slug))
    }

    /// `/expertise-options/` (listado de skills).
    pub fn skills(&self) -> Result<Url, ApiError> {
        self.join("expertise-options/")
    }

    /// `/expertise-options/?skill_id=<id>`
    pub fn expertise(&self, skill_id: i64) -> Result<Url, ApiError> {
        let mut url = self.skills()?;
        url.query_pairs_mut().append_pair("skill_id", &skill_id.to_string());
        Ok(url)
    }
}
