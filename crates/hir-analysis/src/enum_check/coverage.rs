use common::{
    config::{ConversionLabels, EnumSwitchConfig, QualifiedLabels},
    indexmap::IndexMap,
};
use hir::hir_def::{
    Body, ConstValue, Expr, ExprId, NamedType, SwitchStmt, TypeAndValue, TypeInfo,
    TypeTable,
};
use smol_str::SmolStr;

use super::registry::EnumConstant;

/// Which constants of an enum type the case labels of a switch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageResult {
    found: IndexMap<SmolStr, bool>,
}

impl CoverageResult {
    pub fn is_found(&self, name: &str) -> Option<bool> {
        self.found.get(name).copied()
    }

    /// Uncovered constants in declaration order.
    pub fn missing(&self) -> Vec<SmolStr> {
        self.found
            .iter()
            .filter(|(_, found)| !**found)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// What a case label refers to.
enum Label<'a> {
    Name(&'a SmolStr),
    Value(&'a ConstValue),
    Opaque,
}

pub struct CoverageChecker<'a> {
    config: &'a EnumSwitchConfig,
    table: &'a TypeTable,
    body: &'a Body,
    types: &'a TypeInfo,
}

impl<'a> CoverageChecker<'a> {
    pub fn new(
        config: &'a EnumSwitchConfig,
        table: &'a TypeTable,
        body: &'a Body,
        types: &'a TypeInfo,
    ) -> Self {
        Self {
            config,
            table,
            body,
            types,
        }
    }

    /// Returns `None` if the switch is exhaustive, either because a `default`
    /// clause exists or because every constant is named by some label.
    pub fn check(
        &self,
        switch: &SwitchStmt,
        enum_ty: &NamedType,
        constants: &[EnumConstant],
    ) -> Option<CoverageResult> {
        let mut found: IndexMap<SmolStr, bool> = constants
            .iter()
            .map(|constant| (constant.name.clone(), false))
            .collect();

        if switch.has_default() {
            tracing::trace!(ty = %enum_ty, "default clause covers every constant");
            return None;
        }

        for clause in &switch.clauses {
            for &label in clause.labels() {
                self.mark(label, enum_ty, constants, &mut found);
            }
        }

        if found.values().all(|found| *found) {
            None
        } else {
            Some(CoverageResult { found })
        }
    }

    fn mark(
        &self,
        label: ExprId,
        enum_ty: &NamedType,
        constants: &[EnumConstant],
        found: &mut IndexMap<SmolStr, bool>,
    ) {
        match self.resolve_label(label, enum_ty) {
            Label::Name(name) => match found.get_mut(name.as_str()) {
                Some(true) => tracing::debug!(%name, "duplicate case label"),
                Some(slot) => *slot = true,
                None => {
                    tracing::debug!(%name, ty = %enum_ty, "case label is not a constant of the enum")
                }
            },

            Label::Value(value) => {
                let mut matched = false;
                for constant in constants
                    .iter()
                    .filter(|constant| constant.value.as_ref() == Some(value))
                {
                    if let Some(slot) = found.get_mut(constant.name.as_str()) {
                        *slot = true;
                        matched = true;
                    }
                }
                if !matched {
                    tracing::debug!(%value, ty = %enum_ty, "case value matches no constant");
                }
            }

            Label::Opaque => {}
        }
    }

    fn resolve_label(&self, label: ExprId, enum_ty: &NamedType) -> Label<'a> {
        let label = self.body.unparen(label);
        match self.body.expr(label) {
            Expr::Ident(name) => Label::Name(name),

            Expr::Selector(base, member) => match self.config.qualified_labels {
                QualifiedLabels::Loose => Label::Name(member),
                QualifiedLabels::Strict => match self.types.package_ref(*base) {
                    Some(package) if *package == enum_ty.package => Label::Name(member),
                    qualifier => {
                        tracing::debug!(
                            %member,
                            ?qualifier,
                            owner = %enum_ty.package,
                            "qualified label does not reference the package of the enum"
                        );
                        Label::Opaque
                    }
                },
            },

            _ => self.evaluate_label(label, enum_ty),
        }
    }

    fn evaluate_label(&self, label: ExprId, enum_ty: &NamedType) -> Label<'a> {
        if self.config.conversion_labels == ConversionLabels::Ignore {
            tracing::debug!(?label, "case label is neither an identifier nor a selector");
            return Label::Opaque;
        }

        match self.types.type_and_value(label) {
            Some(TypeAndValue {
                ty,
                value: Some(value),
            }) if self.table.as_named(*ty) == Some(enum_ty) => Label::Value(value),
            _ => {
                tracing::debug!(?label, ty = %enum_ty, "case label has no constant value of the enum type");
                Label::Opaque
            }
        }
    }
}
