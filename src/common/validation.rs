// src/common/validation.rs
//
// Schemas declarativos avaliados sobre o JSON bruto (body ou query string).
// Todas as violações são coletadas, na ordem de declaração dos campos.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Number, Value};
use validator::ValidateEmail;

use crate::common::{dates, error::AppError};

pub static CPF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}.\d{3}.\d{3}-\d{2}").expect("regex de CPF"));
pub static CNPJ_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}.\d{3}.\d{3}/\d{4}-\d{2}").expect("regex de CNPJ"));
pub static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5}-\d{3}").expect("regex de CEP"));
pub static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{24}$").expect("regex de id"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub message: String,
    pub field: String,
    #[serde(rename = "type")]
    pub rule: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    details: Vec<ValidationDetail>,
}

impl ValidationErrors {
    pub fn details(&self) -> &[ValidationDetail] {
        &self.details
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    fn push(&mut self, field: &str, message: String, rule: &'static str) {
        self.details.push(ValidationDetail {
            message,
            field: field.to_string(),
            rule,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    String,
    Integer,
    Number,
    Boolean,
    Date,
}

#[derive(Debug)]
enum FieldKind {
    Scalar(Scalar),
    Array(Schema),
    Object(Schema),
}

#[derive(Debug)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    length: Option<usize>,
    pattern: Option<&'static Regex>,
    pattern_message: Option<&'static str>,
    email: bool,
    one_of: Option<&'static [&'static str]>,
    min_items: Option<usize>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            min: None,
            max: None,
            min_length: None,
            length: None,
            pattern: None,
            pattern_message: None,
            email: false,
            one_of: None,
            min_items: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::String))
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Integer))
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Number))
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Boolean))
    }

    /// Data no formato DD/MM/YYYY.
    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar(Scalar::Date))
    }

    /// Lista de objetos, cada um validado por `items`.
    pub fn array(name: &'static str, items: Schema) -> Self {
        Self::new(name, FieldKind::Array(items))
    }

    pub fn object(name: &'static str, schema: Schema) -> Self {
        Self::new(name, FieldKind::Object(schema))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn pattern(mut self, regex: &'static Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    /// Troca a mensagem padrão da falha de `pattern`.
    pub fn pattern_message(mut self, message: &'static str) -> Self {
        self.pattern_message = Some(message);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.one_of = Some(allowed);
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    fn check(&self, value: &Value, path: &str, errors: &mut ValidationErrors) -> Option<Value> {
        match &self.kind {
            FieldKind::Scalar(kind) => self.check_scalar(*kind, value, path, errors),
            FieldKind::Array(items) => {
                let Some(list) = value.as_array() else {
                    errors.push(path, format!("\"{}\" must be an array", self.name), "array.base");
                    return None;
                };
                if let Some(min) = self.min_items {
                    if list.len() < min {
                        errors.push(
                            path,
                            format!("\"{}\" must contain at least {} items", self.name, min),
                            "array.min",
                        );
                    }
                }
                let checked = list
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let label = format!("{}[{}]", self.name, i);
                        items.check_object(item, &format!("{path}.{i}"), &label, errors)
                    })
                    .collect();
                Some(Value::Array(checked))
            }
            FieldKind::Object(schema) => Some(schema.check_object(value, path, self.name, errors)),
        }
    }

    fn check_scalar(
        &self,
        kind: Scalar,
        value: &Value,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Value> {
        let label = self.name;
        match kind {
            Scalar::String => {
                let Some(text) = value.as_str() else {
                    errors.push(path, format!("\"{label}\" must be a string"), "string.base");
                    return None;
                };
                if text.is_empty() {
                    errors.push(
                        path,
                        format!("\"{label}\" is not allowed to be empty"),
                        "string.empty",
                    );
                    return None;
                }
                let chars = text.chars().count();
                if let Some(length) = self.length {
                    if chars != length {
                        errors.push(
                            path,
                            format!("\"{label}\" length must be {length} characters long"),
                            "string.length",
                        );
                    }
                }
                if let Some(min) = self.min_length {
                    if chars < min {
                        errors.push(
                            path,
                            format!("\"{label}\" length must be at least {min} characters long"),
                            "string.min",
                        );
                    }
                }
                if self.email && !text.to_owned().validate_email() {
                    errors.push(path, format!("\"{label}\" must be a valid email"), "string.email");
                }
                if let Some(regex) = self.pattern {
                    if !regex.is_match(text) {
                        let message = match self.pattern_message {
                            Some(custom) => custom.to_string(),
                            None => format!(
                                "\"{label}\" with value \"{text}\" fails to match the required pattern: /{}/",
                                regex.as_str()
                            ),
                        };
                        errors.push(path, message, "string.pattern.base");
                    }
                }
                if let Some(allowed) = self.one_of {
                    if !allowed.contains(&text) {
                        errors.push(
                            path,
                            format!("\"{label}\" must be one of [{}]", allowed.join(", ")),
                            "any.only",
                        );
                    }
                }
                Some(Value::String(text.to_string()))
            }
            Scalar::Integer | Scalar::Number => {
                // A query string chega como texto; converte como o body faria.
                let parsed = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                let Some(number) = parsed.filter(|n| n.is_finite()) else {
                    errors.push(path, format!("\"{label}\" must be a number"), "number.base");
                    return None;
                };
                if kind == Scalar::Integer && number.fract() != 0.0 {
                    errors.push(path, format!("\"{label}\" must be an integer"), "number.integer");
                    return None;
                }
                if let Some(min) = self.min {
                    if number < min {
                        errors.push(
                            path,
                            format!("\"{label}\" must be greater than or equal to {}", format_bound(min)),
                            "number.min",
                        );
                    }
                }
                if let Some(max) = self.max {
                    if number > max {
                        errors.push(
                            path,
                            format!("\"{label}\" must be less than or equal to {}", format_bound(max)),
                            "number.max",
                        );
                    }
                }
                match (kind, value) {
                    (Scalar::Integer, _) => Some(Value::from(number as i64)),
                    (_, Value::Number(_)) => Some(value.clone()),
                    _ => Number::from_f64(number).map(Value::Number),
                }
            }
            Scalar::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                Value::String(s) if s == "true" => Some(Value::Bool(true)),
                Value::String(s) if s == "false" => Some(Value::Bool(false)),
                _ => {
                    errors.push(path, format!("\"{label}\" must be a boolean"), "boolean.base");
                    None
                }
            },
            Scalar::Date => {
                let parsed = value.as_str().and_then(dates::parse_date);
                if parsed.is_none() {
                    errors.push(
                        path,
                        format!("\"{label}\" must be in DD/MM/YYYY format"),
                        "date.format",
                    );
                    return None;
                }
                Some(value.clone())
            }
        }
    }
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// `limit` e `offset` das listagens.
    pub fn paged(self) -> Self {
        self.field(Field::integer("limit").min(1.0))
            .field(Field::integer("offset").min(0.0))
    }

    /// Valida e devolve o valor normalizado (números convertidos, chaves desconhecidas rejeitadas).
    pub fn validate(&self, input: &Value) -> Result<Value, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let normalized = self.check_object(input, "", "value", &mut errors);
        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }

    /// `validate` seguido da desserialização no payload tipado.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, AppError> {
        let normalized = self.validate(input).map_err(AppError::ValidationError)?;
        serde_json::from_value(normalized).map_err(|err| {
            // Valor aceito pelas regras mas fora do alcance do tipo de destino.
            let mut errors = ValidationErrors::default();
            errors.push("value", format!("\"value\" {err}"), "any.invalid");
            AppError::ValidationError(errors)
        })
    }

    fn check_object(
        &self,
        input: &Value,
        path: &str,
        label: &str,
        errors: &mut ValidationErrors,
    ) -> Value {
        let Some(object) = input.as_object() else {
            let field = if path.is_empty() { label } else { path };
            errors.push(field, format!("\"{label}\" must be of type object"), "object.base");
            return Value::Null;
        };

        let mut normalized = Map::new();
        for field in &self.fields {
            let field_path = join(path, field.name);
            match object.get(field.name) {
                None => {
                    if field.required {
                        errors.push(
                            &field_path,
                            format!("\"{}\" is required", field.name),
                            "any.required",
                        );
                    }
                }
                Some(value) => {
                    if let Some(checked) = field.check(value, &field_path, errors) {
                        normalized.insert(field.name.to_string(), checked);
                    }
                }
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                errors.push(&join(path, key), format!("\"{key}\" is not allowed"), "object.unknown");
            }
        }

        Value::Object(normalized)
    }
}

/// Converte os parâmetros da query string num objeto JSON de strings.
pub fn from_query(params: HashMap<String, String>) -> Value {
    Value::Object(params.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static PLATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d{4}$").unwrap());

    fn car_like() -> Schema {
        Schema::new()
            .field(Field::string("modelo").required())
            .field(Field::string("cor").required())
            .field(Field::integer("ano").min(1950.0).max(2022.0).required())
            .field(
                Field::array("acessorios", Schema::new().field(Field::string("descricao").required()))
                    .min_items(1)
                    .required(),
            )
    }

    fn messages(errors: &ValidationErrors) -> Vec<&str> {
        errors.details().iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn collects_every_violation_in_declaration_order() {
        let errors = car_like()
            .validate(&json!({ "ano": 2030, "acessorios": [] }))
            .unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "\"modelo\" is required",
                "\"cor\" is required",
                "\"ano\" must be less than or equal to 2022",
                "\"acessorios\" must contain at least 1 items",
            ]
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        for year in [1950, 2022] {
            let input = json!({
                "modelo": "Gol", "cor": "Azul", "ano": year,
                "acessorios": [{ "descricao": "Ar" }]
            });
            assert!(car_like().validate(&input).is_ok(), "{year} should pass");
        }
        let errors = car_like()
            .validate(&json!({
                "modelo": "Gol", "cor": "Azul", "ano": 1949,
                "acessorios": [{ "descricao": "Ar" }]
            }))
            .unwrap_err();
        assert_eq!(messages(&errors), vec!["\"ano\" must be greater than or equal to 1950"]);
    }

    #[test]
    fn nested_fields_report_their_path() {
        let errors = car_like()
            .validate(&json!({
                "modelo": "Gol", "cor": "Azul", "ano": 2000,
                "acessorios": [{ "descricao": "Ar" }, {}]
            }))
            .unwrap_err();
        assert_eq!(errors.details()[0].field, "acessorios.1.descricao");
        assert_eq!(errors.details()[0].message, "\"descricao\" is required");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let schema = Schema::new().field(Field::string("nome"));
        let errors = schema.validate(&json!({ "senha": "123456" })).unwrap_err();
        assert_eq!(messages(&errors), vec!["\"senha\" is not allowed"]);
    }

    #[test]
    fn query_strings_are_coerced() {
        let schema = Schema::new()
            .field(Field::integer("limit").min(1.0))
            .field(Field::boolean("isFilial"));
        let params = HashMap::from([
            ("limit".to_string(), "5".to_string()),
            ("isFilial".to_string(), "true".to_string()),
        ]);
        let normalized = schema.validate(&from_query(params)).unwrap();
        assert_eq!(normalized, json!({ "limit": 5, "isFilial": true }));

        let bad = HashMap::from([("limit".to_string(), "abc".to_string())]);
        let errors = schema.validate(&from_query(bad)).unwrap_err();
        assert_eq!(messages(&errors), vec!["\"limit\" must be a number"]);
    }

    #[test]
    fn string_rules() {
        let schema = Schema::new()
            .field(Field::string("email").email())
            .field(Field::string("senha").min_length(6))
            .field(Field::string("placa").pattern(&PLATE))
            .field(Field::string("status").one_of(&["disponível", "indisponível"]))
            .field(Field::string("id_carro").length(24).pattern(&PLATE).pattern_message("Invalid id_carro"));

        let errors = schema
            .validate(&json!({
                "email": "nope",
                "senha": "123",
                "placa": "abc",
                "status": "quebrado",
                "id_carro": "12"
            }))
            .unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "\"email\" must be a valid email",
                "\"senha\" length must be at least 6 characters long",
                "\"placa\" with value \"abc\" fails to match the required pattern: /^[A-Z]{3}\\d{4}$/",
                "\"status\" must be one of [disponível, indisponível]",
                "\"id_carro\" length must be 24 characters long",
                "Invalid id_carro",
            ]
        );
    }

    #[test]
    fn paging_bounds() {
        let schema = Schema::new().paged();
        let errors = schema
            .validate(&json!({ "limit": "0", "offset": "-1" }))
            .unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                "\"limit\" must be greater than or equal to 1",
                "\"offset\" must be greater than or equal to 0",
            ]
        );
    }

    #[test]
    fn tax_id_patterns_match_formatted_values() {
        assert!(CPF_PATTERN.is_match("131.147.860-49"));
        assert!(!CPF_PATTERN.is_match("13114786049"));
        assert!(CNPJ_PATTERN.is_match("16.670.085/0001-55"));
        assert!(CEP_PATTERN.is_match("96200-200"));
        assert!(!ID_PATTERN.is_match("12"));
        assert!(ID_PATTERN.is_match("6171508962f47a7a91938d30"));
    }

    #[test]
    fn out_of_range_values_become_validation_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Seats {
            #[allow(dead_code)]
            lugares: u8,
        }

        let schema = Schema::new().field(Field::integer("lugares").min(1.0));
        let err = schema.parse::<Seats>(&json!({ "lugares": 300 })).unwrap_err();
        let AppError::ValidationError(errors) = err else {
            panic!("esperava ValidationError, veio {err:?}");
        };
        assert_eq!(errors.details().len(), 1);
        assert_eq!(errors.details()[0].rule, "any.invalid");
    }

    #[test]
    fn rejects_non_object_payload() {
        let errors = car_like().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(messages(&errors), vec!["\"value\" must be of type object"]);
    }

    #[test]
    fn dates_must_follow_brazilian_format() {
        let schema = Schema::new().field(Field::date("data_nascimento").required());
        assert!(schema.validate(&json!({ "data_nascimento": "03/03/2000" })).is_ok());
        let errors = schema.validate(&json!({ "data_nascimento": "2000-03-03" })).unwrap_err();
        assert_eq!(messages(&errors), vec!["\"data_nascimento\" must be in DD/MM/YYYY format"]);
    }
}
