use crate::models::{RawSearchResponse, SearchPage};
use crate::OmdbClient;

impl OmdbClient {
    /// Fetch one page of search results.
    /// GET /?s=<term>&y=<year>&apikey=<key>&page=<page>
    ///
    /// A non-success status or an undecodable body is an error; a body that
    /// reports `"Response": "False"` is an exhausted page, which is normal
    /// termination for pagination.
    pub async fn search_page(
        &self,
        term: &str,
        year: Option<i32>,
        page: u32,
    ) -> crate::Result<SearchPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("s", term.to_string()),
            ("apikey", self.api_key().to_string()),
            ("page", page.to_string()),
        ];
        if let Some(year) = year {
            params.push(("y", year.to_string()));
        }

        let response = self.client().get(self.base_url()).query(&params).send().await?;
        let raw: RawSearchResponse = self.handle_response(response).await?;
        SearchPage::from_raw(raw)
    }
}
