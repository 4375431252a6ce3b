use std::future::Future;

use recursive_did::{InscriptionId, Page};

use crate::error::Result;

/// Walks a cursor-paginated listing to completion.
///
/// Requests page 0, 1, 2, ... strictly sequentially, appending each page's
/// ids to the accumulator in arrival order, until a page reports
/// `more == false`. The locally maintained counter is what gets requested;
/// the `page` number echoed by the server is ignored for loop control.
///
/// There is no iteration bound and no deduplication. An error from the page
/// closure aborts the walk and propagates; a closure that swallows its own
/// failures (the children listing does) instead terminates the walk with a
/// truncated accumulator.
pub async fn collect_pages<F, Fut>(mut next_page: F) -> Result<Vec<InscriptionId>>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<Page>>,
{
    let mut ids = Vec::new();
    let mut page = 0;

    loop {
        let result = next_page(page).await?;
        ids.extend(result.ids);
        if !result.more {
            return Ok(ids);
        }
        page += 1;
    }
}
