use crate::ProviderType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The fetch inputs of this provider changed; its fetcher must re-evaluate.
    EvaluateFetch { provider: ProviderType },
    /// The category list of this provider is needed and not loaded yet.
    LoadCategories { provider: ProviderType },
}
