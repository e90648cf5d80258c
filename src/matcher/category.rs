use crate::config::ParserConfig;
use crate::model::Product;
use crate::normalizer::singularize;

/// Resolves a token to a catalog category. Keywords match in singular or plural form,
/// since the token itself has already been through `singularize`.
pub fn category_for_token<'c>(token: &str, cfg: &'c ParserConfig) -> Option<&'c str> {
    cfg.category_keywords
        .iter()
        .find(|(keyword, _)| {
            keyword.as_str() == token
                || singularize(keyword) == token
                || singularize(&format!("{}s", keyword)) == token
        })
        .map(|(_, category)| category.as_str())
}

/// First named catalog entry whose category equals `category`, ignoring case.
pub fn representative<'a>(catalog: &'a [Product], category: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| {
        !p.name.trim().is_empty()
            && p.category
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(category))
    })
}

/// Single-intent fallback: the tokens must name a category and carry at most one other token.
pub fn fallback_product<'a>(
    tokens: &[String],
    catalog: &'a [Product],
    cfg: &ParserConfig,
) -> Option<&'a Product> {
    let category = tokens.iter().find_map(|t| category_for_token(t, cfg))?;
    // the keyword itself plus at most one qualifier
    if tokens.len() > 2 {
        return None;
    }
    representative(catalog, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::tokenize;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Fresh Tomatoes", 40.0, "vegetables", 25),
            Product::new(3, "Sweet Bananas", 60.0, "fruits", 20),
            Product::new(4, "Fresh Apples", 120.0, "Fruits", 18),
        ]
    }

    #[test]
    fn plural_and_singular_keywords_resolve() {
        let cfg = ParserConfig::default();
        for word in ["vegetable", "vegetables", "veggies", "Fruits"] {
            let tokens = tokenize(word, &cfg);
            assert_eq!(tokens.len(), 1, "{word}");
            assert!(category_for_token(&tokens[0], &cfg).is_some(), "{word}");
        }
    }

    #[test]
    fn first_product_in_category_is_chosen() {
        let cfg = ParserConfig::default();
        let products = catalog();
        let tokens = tokenize("fruits", &cfg);
        assert_eq!(fallback_product(&tokens, &products, &cfg).unwrap().id, 3);
    }

    #[test]
    fn one_extra_token_is_tolerated_two_are_not() {
        let cfg = ParserConfig::default();
        let products = catalog();
        let one = tokenize("some cheap vegetables", &cfg);
        assert_eq!(fallback_product(&one, &products, &cfg).unwrap().id, 1);
        let two = tokenize("cheap local vegetables", &cfg);
        assert!(fallback_product(&two, &products, &cfg).is_none());
    }

    #[test]
    fn missing_category_in_catalog_yields_nothing() {
        let cfg = ParserConfig::default();
        let products = catalog();
        let tokens = tokenize("dairy", &cfg);
        assert!(fallback_product(&tokens, &products, &cfg).is_none());
    }

    #[test]
    fn unnamed_products_are_never_representatives() {
        let products = vec![
            Product::new(1, " ", 10.0, "dairy", 5),
            Product::new(2, "Whole Milk", 65.0, "dairy", 30),
        ];
        assert_eq!(representative(&products, "dairy").unwrap().id, 2);
        assert!(representative(&products[..1], "dairy").is_none());
    }
}
