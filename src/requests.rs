// Customer requests for out-of-stock products
use crate::catalog::Catalog;
use crate::model::{CustomerRequest, ProductId, RequestError, RequestStatus, Session};
use crate::storage::{load_json, save_json, KeyValueStore};
use chrono::Utc;

const NAMESPACE: &str = "requests";
const COUNTER_NAMESPACE: &str = "counters";
const COUNTER_KEY: &str = "requests";

/// Records that the session's customer wants `quantity` of an out-of-stock product.
pub fn submit(
    store: &mut dyn KeyValueStore,
    catalog: &Catalog,
    session: &Session,
    product_id: ProductId,
    quantity: u32,
) -> Result<CustomerRequest, RequestError> {
    let product = catalog
        .get(product_id)
        .ok_or(RequestError::NotFound(product_id))?;
    if product.stock > 0 {
        return Err(RequestError::NotOutOfStock(product.name.clone()));
    }

    let id = next_id(store)?;
    let request = CustomerRequest {
        id,
        customer_email: session.email.clone(),
        customer_name: session.name.clone(),
        product_id,
        product_name: product.name.clone(),
        quantity: quantity.max(1),
        status: RequestStatus::Pending,
        created_at: Utc::now(),
    };
    save_json(store, NAMESPACE, &key(id), &request)?;
    Ok(request)
}

/// Pending requests, newest first.
pub fn pending(store: &dyn KeyValueStore) -> Result<Vec<CustomerRequest>, RequestError> {
    let mut requests = Vec::new();
    for k in store.keys(NAMESPACE)? {
        if let Some(request) = load_json::<CustomerRequest>(store, NAMESPACE, &k)? {
            if request.status == RequestStatus::Pending {
                requests.push(request);
            }
        }
    }
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(requests)
}

pub fn mark_notified(store: &mut dyn KeyValueStore, id: u64) -> Result<CustomerRequest, RequestError> {
    let mut request: CustomerRequest =
        load_json(store, NAMESPACE, &key(id))?.ok_or(RequestError::UnknownRequest(id))?;
    request.status = RequestStatus::Notified;
    save_json(store, NAMESPACE, &key(id), &request)?;
    Ok(request)
}

fn next_id(store: &mut dyn KeyValueStore) -> Result<u64, RequestError> {
    let last: u64 = load_json(store, COUNTER_NAMESPACE, COUNTER_KEY)?.unwrap_or(0);
    let id = last + 1;
    save_json(store, COUNTER_NAMESPACE, COUNTER_KEY, &id)?;
    Ok(id)
}

// zero-padded so key order follows id order
fn key(id: u64) -> String {
    format!("{:020}", id)
}
