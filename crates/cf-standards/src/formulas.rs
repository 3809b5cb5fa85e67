//! Dimensionless vertical coordinate formulas.

use std::collections::BTreeMap;

/// Standard names of dimensionless vertical coordinates, mapped through an
/// alias layer onto formula families.
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    aliases: BTreeMap<String, String>,
    formulas: BTreeMap<String, Vec<String>>,
}

const ALIASES: &[(&str, &str)] = &[
    (
        "atmosphere_ln_pressure_coordinate",
        "atmosphere_ln_pressure_coordinate",
    ),
    ("atmosphere_sigma_coordinate", "sigma"),
    ("sigma", "sigma"),
    (
        "atmosphere_hybrid_sigma_pressure_coordinate",
        "hybrid_sigma_pressure",
    ),
    ("hybrid_sigma_pressure", "hybrid_sigma_pressure"),
    (
        "atmosphere_hybrid_height_coordinate",
        "atmosphere_hybrid_height_coordinate",
    ),
    ("ocean_sigma_coordinate", "ocean_sigma_coordinate"),
    ("ocean_s_coordinate", "ocean_s_coordinate"),
    ("ocean_sigma_z_coordinate", "ocean_sigma_z_coordinate"),
    (
        "ocean_double_sigma_coordinate",
        "ocean_double_sigma_coordinate",
    ),
];

const FORMULAS: &[(&str, &[&str])] = &[
    ("atmosphere_ln_pressure_coordinate", &["p(k)=p0*exp(-lev(k))"]),
    ("sigma", &["p(n,k,j,i)=ptop+sigma(k)*(ps(n,j,i)-ptop)"]),
    (
        "hybrid_sigma_pressure",
        &[
            "p(n,k,j,i)=a(k)*p0+b(k)*ps(n,j,i)",
            "p(n,k,j,i)=ap(k)+b(k)*ps(n,j,i)",
        ],
    ),
    (
        "atmosphere_hybrid_height_coordinate",
        &["z(n,k,j,i)=a(k)+b(k)*orog(n,j,i)"],
    ),
    (
        "ocean_sigma_coordinate",
        &["z(n,k,j,i)=eta(n,j,i)+sigma(k)*(depth(j,i)+eta(n,j,i))"],
    ),
    (
        "ocean_s_coordinate",
        &[
            "z(n,k,j,i)=eta(n,j,i)*(1+s(k))+depth_c*s(k)+(depth(j,i)-depth_c)*C(k)",
            "C(k)=(1-b)*sinh(a*s(k))/sinh(a)+b*[tanh(a*(s(k)+0.5))/(2*tanh(0.5*a))-0.5]",
        ],
    ),
    (
        "ocean_sigma_z_coordinate",
        &[
            "z(n,k,j,i)=eta(n,j,i)+sigma(k)*(min(depth_c,depth(j,i))+eta(n,j,i))",
            "z(n,k,j,i)=zlev(k)",
        ],
    ),
    (
        "ocean_double_sigma_coordinate",
        &[
            "z(k,j,i)=sigma(k)*f(j,i)",
            "z(k,j,i)=f(j,i)+(sigma(k)-1)*(depth(j,i)-f(j,i))",
            "f(j,i)=0.5*(z1+z2)+0.5*(z1-z2)*tanh(2*a/(z1-z2)*(depth(j,i)-href))",
        ],
    ),
];

impl FormulaRegistry {
    /// Formulas of CF-1.0, Appendix D.
    pub fn cf_1_0() -> Self {
        let mut registry = Self::default();
        for (name, family) in ALIASES {
            registry.add_alias(*name, *family);
        }
        for (family, templates) in FORMULAS {
            for template in *templates {
                registry.add_formula(*family, *template);
            }
        }
        registry
    }

    pub fn add_alias(&mut self, standard_name: impl Into<String>, family: impl Into<String>) {
        self.aliases.insert(standard_name.into(), family.into());
    }

    pub fn add_formula(&mut self, family: impl Into<String>, template: impl Into<String>) {
        self.formulas
            .entry(family.into())
            .or_default()
            .push(template.into());
    }

    /// Formula family a standard name belongs to.
    pub fn family(&self, standard_name: &str) -> Option<&str> {
        self.aliases.get(standard_name).map(String::as_str)
    }

    pub fn templates(&self, family: &str) -> &[String] {
        self.formulas.get(family).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `term` occurs in any template of `family`.
    pub fn has_term(&self, family: &str, term: &str) -> bool {
        self.templates(family)
            .iter()
            .any(|template| template.contains(term))
    }
}
