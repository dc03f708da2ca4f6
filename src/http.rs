/// GET `url` and decode the JSON body as `T`. Every failure along the way
/// becomes `SourceUnavailable`.
pub(crate) async fn get_json<T>(
    client: &reqwest::Client,
    url: String,
) -> Result<T, crate::error::SourceUnavailable>
where
    T: serde::de::DeserializeOwned,
{
    get_and_decode(client, url, |body| serde_json::from_slice(body)).await
}

/// Like `get_json`, but an empty (or all whitespace) body and a JSON `null`
/// both mean there is nothing there.
pub(crate) async fn get_optional_json<T>(
    client: &reqwest::Client,
    url: String,
) -> Result<Option<T>, crate::error::SourceUnavailable>
where
    T: serde::de::DeserializeOwned,
{
    get_and_decode(client, url, |body| {
        if body.trim_ascii().is_empty() {
            Ok(None)
        } else {
            serde_json::from_slice(body)
        }
    })
    .await
}

async fn get_and_decode<T>(
    client: &reqwest::Client,
    url: String,
    decode: impl FnOnce(&[u8]) -> Result<T, serde_json::Error>,
) -> Result<T, crate::error::SourceUnavailable> {
    let result = async {
        let body = client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok::<T, crate::error::Cause>(decode(&body)?)
    }
    .await;

    result.map_err(|source| {
        tracing::error!(url = url, error =? source, "Request failed");
        crate::error::SourceUnavailable { url, source }
    })
}
