use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use clinica_core::{
    Endpoint, Error, HttpMethod, ParamSpec, ParamType, RemoteApi, ToolArguments,
};

/// A named remote operation: its schema plus the HTTP call it is bound to.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
    pub endpoint: Endpoint,
}

impl ToolDescriptor {
    /// Run the bound remote call with already validated arguments.
    ///
    /// GET sends every argument as a query parameter, POST sends them as a
    /// JSON body. The response body is returned untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Remote`] from the API.
    pub async fn invoke(&self, api: &dyn RemoteApi, args: ToolArguments) -> Result<Value, Error> {
        match self.endpoint.method {
            HttpMethod::Get => api.get(&self.endpoint.path, &args.query_pairs()).await,
            HttpMethod::Post => api.post(&self.endpoint.path, args.into_body()).await,
        }
    }

    /// The catalog view of this tool, without its binding.
    #[must_use]
    pub fn summary(&self) -> ToolSummary<'_> {
        ToolSummary {
            name: &self.name,
            description: &self.description,
            parameters: ParamSchema(&self.parameters),
        }
    }
}

/// What `listTools` reports for a tool.
#[derive(Debug, Serialize)]
pub struct ToolSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub parameters: ParamSchema<'a>,
}

/// Parameter list serialized as an object keyed by name, in declaration order.
#[derive(Debug)]
pub struct ParamSchema<'a>(pub &'a [ParamSpec]);

impl Serialize for ParamSchema<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for spec in self.0 {
            map.serialize_entry(&spec.name, spec)?;
        }
        map.end()
    }
}

/// Fixed, ordered catalog of tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    /// The clinic catalog: patients and providers.
    #[must_use]
    pub fn clinic() -> Self {
        Self::new(vec![
            ToolDescriptor {
                name: "listar_pacientes".to_string(),
                description: "Lista todos os pacientes da clínica".to_string(),
                parameters: vec![
                    ParamSpec::required("cnpj", ParamType::String, "CNPJ da clínica"),
                    ParamSpec::optional("nome", ParamType::String, "Filtro por nome do paciente"),
                    ParamSpec::optional("cpf", ParamType::String, "Filtro por CPF do paciente"),
                ],
                endpoint: Endpoint::get("/pacientes"),
            },
            ToolDescriptor {
                name: "criar_paciente".to_string(),
                description: "Cria um novo paciente na clínica".to_string(),
                parameters: vec![
                    ParamSpec::required("cnpj", ParamType::String, "CNPJ da clínica"),
                    ParamSpec::required("nome", ParamType::String, "Nome do paciente"),
                    ParamSpec::required("cpf", ParamType::String, "CPF do paciente"),
                    ParamSpec::required(
                        "data_nascimento",
                        ParamType::String,
                        "Data de nascimento (YYYY-MM-DD)",
                    ),
                    ParamSpec::required("telefone", ParamType::String, "Telefone do paciente"),
                    ParamSpec::required("email", ParamType::String, "Email do paciente"),
                ],
                endpoint: Endpoint::post("/pacientes"),
            },
            ToolDescriptor {
                name: "listar_executores".to_string(),
                description: "Lista todos os médicos/executores disponíveis".to_string(),
                parameters: vec![
                    ParamSpec::required("cnpj", ParamType::String, "CNPJ da clínica"),
                    ParamSpec::optional("id_especialidade", ParamType::Number, "ID da especialidade"),
                    ParamSpec::optional(
                        "id_tipo_convenio",
                        ParamType::Number,
                        "ID do tipo de convênio",
                    ),
                ],
                endpoint: Endpoint::get("/executores"),
            },
        ])
    }

    /// Look up a tool by exact, case-sensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Result payload for a `listTools` request.
    #[must_use]
    pub fn list_result(&self) -> Value {
        let tools: Vec<ToolSummary<'_>> = self.iter().map(ToolDescriptor::summary).collect();
        serde_json::json!({ "tools": tools })
    }
}
